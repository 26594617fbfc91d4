use std::process::Command;

use super::DesktopCommand;
use crate::wallpaper::error::WallpaperError;

/// Run a wallpaper command directly, without a shell
pub fn apply(command: &DesktopCommand) -> Result<(), WallpaperError> {
    let failed = |reason: String| WallpaperError::ApplyFailed {
        command: command.to_shell_line(),
        reason,
    };

    if which::which(&command.program).is_err() {
        return Err(failed(format!("{} is not installed", command.program)));
    }

    for args in command.invocations() {
        let output = Command::new(&command.program)
            .args(args)
            .output()
            .map_err(|e| failed(e.to_string()))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            let reason = match stderr.trim() {
                "" => format!("exited with {}", output.status),
                msg => msg.to_string(),
            };
            return Err(failed(reason));
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_program_is_reported() {
        let cmd = DesktopCommand {
            program: "redwall-no-such-setter".to_string(),
            args: vec!["/w/a.jpg".to_string()],
            follow_up: Vec::new(),
        };
        let err = apply(&cmd).unwrap_err();
        assert!(err.to_string().contains("redwall-no-such-setter is not installed"));
        assert_eq!(err.exit_code(), 6);
    }

    #[test]
    fn test_failing_program_is_reported() {
        let cmd = DesktopCommand {
            program: "false".to_string(),
            args: Vec::new(),
            follow_up: Vec::new(),
        };
        if which::which("false").is_err() {
            return;
        }
        assert!(matches!(apply(&cmd), Err(WallpaperError::ApplyFailed { .. })));
    }

    #[test]
    fn test_successful_program() {
        if which::which("true").is_err() {
            return;
        }
        let cmd = DesktopCommand {
            program: "true".to_string(),
            args: vec!["ignored".to_string()],
            follow_up: Vec::new(),
        };
        assert!(apply(&cmd).is_ok());
    }

    #[test]
    fn test_follow_up_runs_after_first_invocation() {
        if which::which("sh").is_err() {
            return;
        }
        let temp = tempfile::TempDir::new().unwrap();
        let marker = temp.path().join("second");
        let cmd = DesktopCommand {
            program: "sh".to_string(),
            args: vec!["-c".to_string(), "exit 0".to_string()],
            follow_up: vec![vec![
                "-c".to_string(),
                format!("touch '{}'", marker.display()),
            ]],
        };
        apply(&cmd).unwrap();
        assert!(marker.exists());
    }

    #[test]
    fn test_failing_follow_up_is_reported() {
        if which::which("sh").is_err() {
            return;
        }
        let cmd = DesktopCommand {
            program: "sh".to_string(),
            args: vec!["-c".to_string(), "exit 0".to_string()],
            follow_up: vec![vec!["-c".to_string(), "echo dark key missing >&2; exit 3".to_string()]],
        };
        let err = apply(&cmd).unwrap_err();
        assert!(err.to_string().contains("dark key missing"), "{}", err);
    }
}
