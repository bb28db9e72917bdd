use std::io::Write;

use butterfly::{config::RunConfig, error::LorenzError, integrate::Scheme, prelude::*};
use tempfile::NamedTempFile;

fn write_config(contents: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    file
}

#[test]
fn loads_run_from_file() {
    let file = write_config(
        r#"
rho = 28.0
dt = 0.005
steps = 400
x0 = 1.0
y0 = 1.0
z0 = 1.0
scheme = "rk4"
"#,
    );

    let config = RunConfig::load(file.path()).unwrap();
    config.validate().unwrap();
    assert_eq!(config.scheme, Scheme::Rk4);
    assert_eq!(config.initial(), State::new(1., 1., 1.));

    let t = generate_checked(&config.scheme, config.initial(), config.params(), config.dt, config.steps)
        .unwrap();
    assert_eq!(t.len(), 401);
    assert_eq!(t, generate(State::new(1., 1., 1.), Parameters::default(), 0.005, 400));
}

#[test]
fn malformed_file_is_a_config_error() {
    let file = write_config("steps = \"many\"\n");
    assert!(matches!(RunConfig::load(file.path()), Err(LorenzError::Config(_))));
}

#[test]
fn missing_file_is_an_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("absent.toml");
    assert!(matches!(RunConfig::load(&path), Err(LorenzError::Io(_))));
}

#[test]
fn file_with_invalid_dt_fails_validation() {
    let file = write_config("dt = 0.0\n");
    let config = RunConfig::load(file.path()).unwrap();
    assert!(matches!(
        config.validate(),
        Err(LorenzError::InvalidParameter { name: "dt", .. })
    ));
}
