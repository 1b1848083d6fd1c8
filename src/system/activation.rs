// src/system/activation.rs

use crate::system::executor::{Environment, ExecutionError, Spawner};

/// The command that brings `app_name` to the foreground, if this platform has one.
pub fn activation_command(app_name: &str) -> Option<Vec<String>> {
    if cfg!(target_os = "macos") {
        let escaped = app_name.replace('\\', "\\\\").replace('"', "\\\"");
        Some(vec![
            "osascript".to_string(),
            "-e".to_string(),
            format!("tell application \"{escaped}\" to activate"),
        ])
    } else {
        None
    }
}

/// Asks the OS to bring `app_name` to the foreground. Does not wait for the
/// result; platforms without an activation command succeed immediately.
pub fn activate<S: Spawner + ?Sized>(
    app_name: &str,
    spawner: &S,
    env: &Environment,
) -> Result<(), ExecutionError> {
    match activation_command(app_name) {
        Some(argv) => spawner.spawn_detached(&argv, env).map(|_| ()),
        None => {
            log::debug!("Application activation is not supported on this platform.");
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[cfg(target_os = "macos")]
    #[test]
    fn test_osascript_command_escapes_quotes() {
        let argv = activation_command("My \"App\"").unwrap();
        assert_eq!(argv[0], "osascript");
        assert_eq!(argv[2], "tell application \"My \\\"App\\\"\" to activate");
    }

    #[cfg(not(target_os = "macos"))]
    #[test]
    fn test_no_activation_outside_macos() {
        assert!(activation_command("Sublime Merge").is_none());
    }
}
