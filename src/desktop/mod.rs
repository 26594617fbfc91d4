//! Desktop environment detection and wallpaper command templates
//!
//! Detection only looks at a snapshot of environment variables, so it can be
//! tested without touching the process environment. Running the command lives
//! in [`apply`].

use serde::{Deserialize, Serialize};
use std::env;
use std::path::Path;

use crate::common::shell::shell_join;
use crate::wallpaper::error::WallpaperError;

pub mod apply;

/// Desktop environments we know how to set a wallpaper on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum DesktopEnvironment {
    Kde,
    Gnome,
    Lubuntu,
    Mate,
    I3,
    Xfce,
    #[value(skip)]
    Unsupported,
}

/// Environment variables relevant for detection
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DesktopObservations {
    pub xdg_current_desktop: Option<String>,
    pub desktop_session: Option<String>,
    pub gdm_session: Option<String>,
    pub kde_full_session: Option<String>,
}

impl DesktopObservations {
    pub fn from_env() -> Self {
        let var = |name: &str| env::var(name).ok().filter(|v| !v.trim().is_empty());
        Self {
            xdg_current_desktop: var("XDG_CURRENT_DESKTOP"),
            desktop_session: var("DESKTOP_SESSION"),
            gdm_session: var("GDMSESSION"),
            kde_full_session: var("KDE_FULL_SESSION"),
        }
    }
}

/// A program and its arguments, ready to run without a shell
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DesktopCommand {
    pub program: String,
    pub args: Vec<String>,
    /// Further argument lists for the same program, run in order after `args`
    pub follow_up: Vec<Vec<String>>,
}

impl DesktopCommand {
    /// Every argument list in run order
    pub fn invocations(&self) -> impl Iterator<Item = &[String]> {
        std::iter::once(self.args.as_slice()).chain(self.follow_up.iter().map(Vec::as_slice))
    }

    /// Copy-pasteable shell line
    pub fn to_shell_line(&self) -> String {
        self.invocations()
            .map(|args| shell_join(&self.program, args))
            .collect::<Vec<_>>()
            .join(" && ")
    }
}

const KDE_SCRIPT: &str = r#"var d = desktops()[{display}] || desktops()[0]; d.wallpaperPlugin = "org.kde.image"; d.currentConfigGroup = Array("Wallpaper", "org.kde.image", "General"); d.writeConfig("Image", "{script_uri}");"#;

type Template = &'static [&'static [&'static str]];

const KDE_ARGS: Template = &[&[
    "org.kde.plasmashell",
    "/PlasmaShell",
    "org.kde.PlasmaShell.evaluateScript",
    KDE_SCRIPT,
]];
// GNOME 42+ shows picture-uri-dark when the dark style is active
const GNOME_ARGS: Template = &[
    &["set", "org.gnome.desktop.background", "picture-uri", "{uri}"],
    &["set", "org.gnome.desktop.background", "picture-uri-dark", "{uri}"],
];
const LUBUNTU_ARGS: Template = &[&["-w", "{path}", "--wallpaper-mode=fit"]];
const MATE_ARGS: Template = &[&["set", "org.mate.background", "picture-filename", "{path}"]];
const I3_ARGS: Template = &[&["--bg-fill", "{path}"]];
const XFCE_ARGS: Template = &[&[
    "--channel",
    "xfce4-desktop",
    "--property",
    "/backdrop/screen0/monitor{display}/workspace0/last-image",
    "--set",
    "{path}",
]];

/// Escape text for a double-quoted JavaScript string literal
fn js_string_escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '"' => out.push_str("\\\""),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            _ => out.push(c),
        }
    }
    out
}

impl DesktopEnvironment {
    /// Detect from the current process environment
    pub fn detect() -> Self {
        Self::detect_from(&DesktopObservations::from_env())
    }

    /// First recognised session name wins, in the order
    /// `XDG_CURRENT_DESKTOP`, `DESKTOP_SESSION`, `GDMSESSION`.
    pub fn detect_from(obs: &DesktopObservations) -> Self {
        let sources = [&obs.xdg_current_desktop, &obs.desktop_session, &obs.gdm_session];
        for source in sources.into_iter().flatten() {
            for token in source.split(':') {
                if let Some(de) = Self::from_session_name(token) {
                    return de;
                }
            }
        }

        if obs
            .kde_full_session
            .as_deref()
            .is_some_and(|v| v.eq_ignore_ascii_case("true"))
        {
            return DesktopEnvironment::Kde;
        }

        DesktopEnvironment::Unsupported
    }

    fn from_session_name(name: &str) -> Option<Self> {
        let name = name.trim().to_lowercase();
        let de = match name.as_str() {
            "kde" | "plasma" | "plasmawayland" | "kde-plasma" => DesktopEnvironment::Kde,
            "gnome" | "gnome-xorg" | "gnome-classic" | "ubuntu" | "ubuntu-xorg" | "unity" => {
                DesktopEnvironment::Gnome
            }
            "lubuntu" | "lxde" => DesktopEnvironment::Lubuntu,
            "mate" => DesktopEnvironment::Mate,
            "i3" | "i3wm" => DesktopEnvironment::I3,
            "xfce" | "xfce4" | "xubuntu" => DesktopEnvironment::Xfce,
            _ => return None,
        };
        Some(de)
    }

    /// Get a human-readable name for the desktop environment
    pub fn name(&self) -> &'static str {
        match self {
            DesktopEnvironment::Kde => "KDE Plasma",
            DesktopEnvironment::Gnome => "GNOME",
            DesktopEnvironment::Lubuntu => "Lubuntu",
            DesktopEnvironment::Mate => "MATE",
            DesktopEnvironment::I3 => "i3",
            DesktopEnvironment::Xfce => "Xfce",
            DesktopEnvironment::Unsupported => "unsupported",
        }
    }

    /// Command template with `{path}`, `{uri}`, `{script_uri}` and `{display}` placeholders
    fn template(&self) -> Option<(&'static str, Template)> {
        match self {
            DesktopEnvironment::Kde => Some(("qdbus", KDE_ARGS)),
            DesktopEnvironment::Gnome => Some(("gsettings", GNOME_ARGS)),
            DesktopEnvironment::Lubuntu => Some(("pcmanfm", LUBUNTU_ARGS)),
            DesktopEnvironment::Mate => Some(("gsettings", MATE_ARGS)),
            DesktopEnvironment::I3 => Some(("feh", I3_ARGS)),
            DesktopEnvironment::Xfce => Some(("xfconf-query", XFCE_ARGS)),
            DesktopEnvironment::Unsupported => None,
        }
    }

    /// Fill the template for an absolute image path
    pub fn command_for(&self, path: &Path, display: u32) -> Result<DesktopCommand, WallpaperError> {
        let (program, args) =
            self.template()
                .ok_or_else(|| WallpaperError::DesktopEnvironmentUnsupported {
                    path: path.to_path_buf(),
                })?;

        let path_str = path.to_string_lossy();
        let uri = format!("file://{}", path_str);
        let script_uri = js_string_escape(&uri);
        let display = display.to_string();
        let fill = |args: &[&str]| -> Vec<String> {
            args.iter()
                .map(|arg| {
                    arg.replace("{path}", &path_str)
                        .replace("{script_uri}", &script_uri)
                        .replace("{uri}", &uri)
                        .replace("{display}", &display)
                })
                .collect()
        };

        let mut invocations = args.iter().map(|a| fill(a));
        Ok(DesktopCommand {
            program: program.to_string(),
            args: invocations.next().unwrap_or_default(),
            follow_up: invocations.collect(),
        })
    }
}
