/// Parse the environment variable `name` into `target`, e.g. `LOG_LEVEL` into
/// the logger threshold. An unset variable leaves `target` untouched; a value
/// that does not parse is an `EnvError` naming the variable.
pub fn load_env_var<T>(name: &str, target: &mut T) -> Result<(), super::ConfigError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    if let Ok(value) = std::env::var(name) {
        *target = value
            .parse()
            .map_err(|e| super::ConfigError::EnvError(format!("Invalid {name}: {e}")))?;
    }
    Ok(())
}
