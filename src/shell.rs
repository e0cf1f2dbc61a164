use crate::error::{Error, Result};
use crate::platform;
use log::debug;
use std::env;
use std::path::{Path, PathBuf};

/// Closing delimiter of an injected block, shared by every dialect.
pub const END_MARKER: &str = "# <<< END OF 'utix' SCRIPT";

/// Shells whose startup files we know how to patch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shell {
    Sh,
    Bash,
    Zsh,
    Fish,
    Nu,
}

/// Every supported shell, in no particular order.
pub const SHELLS: [Shell; 5] = [Shell::Sh, Shell::Bash, Shell::Zsh, Shell::Fish, Shell::Nu];

impl Shell {
    /// Detects the user's shell from the `SHELL` environment variable.
    pub fn detect() -> Result<Self> {
        let shell = env::var("SHELL").unwrap_or_default();
        if shell.is_empty() {
            return Err(Error::NoShell);
        }
        let name = Path::new(&shell)
            .file_stem()
            .and_then(|stem| stem.to_str())
            .unwrap_or("");
        debug!("detected shell program {shell:?}, normalized name {name:?}");
        Self::from_name(name)
    }

    /// Matching is exact and case-sensitive; anything outside the fixed
    /// set is an unsupported shell.
    pub fn from_name(name: &str) -> Result<Self> {
        match name {
            "sh" => Ok(Self::Sh),
            "bash" => Ok(Self::Bash),
            "zsh" => Ok(Self::Zsh),
            "fish" => Ok(Self::Fish),
            "nu" => Ok(Self::Nu),
            other => Err(Error::UnsupportedShell(other.to_string())),
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Sh => "sh",
            Self::Bash => "bash",
            Self::Zsh => "zsh",
            Self::Fish => "fish",
            Self::Nu => "nu",
        }
    }

    /// First line of this dialect's snippet; its presence in a startup
    /// file means the snippet was already injected.
    pub fn marker(self) -> &'static str {
        match self {
            Self::Sh => "# ADDED BY 'utix' SCRIPT (sh) >>>",
            Self::Bash => "# ADDED BY 'utix' SCRIPT (bash) >>>",
            Self::Zsh => "# ADDED BY 'utix' SCRIPT (zsh) >>>",
            Self::Fish => "# ADDED BY 'utix' SCRIPT (fish) >>>",
            Self::Nu => "# ADDED BY 'utix' SCRIPT (nu) >>>",
        }
    }

    /// The startup file this dialect's snippet goes into.
    ///
    /// Only nushell keeps its config under the resolved configuration
    /// directory; everything else lives directly under `home`.
    pub fn startup_file(self, home: &Path) -> Result<PathBuf> {
        Ok(match self {
            Self::Sh => home.join(".profile"),
            Self::Bash => home.join(".bashrc"),
            Self::Zsh => home.join(".zshrc"),
            Self::Fish => home.join(".config").join("fish").join("config.fish"),
            Self::Nu => platform::config_dir()?.join("nushell").join("config.nu"),
        })
    }

    /// The PATH-extension block to inject for this dialect.
    ///
    /// Each variant appends `utils_dir` to the search path only when it
    /// is not already a member, in that shell's own syntax. bash and zsh
    /// share one template; zsh accepts the bash-style test.
    pub fn snippet(self, utils_dir: &Path) -> String {
        let marker = self.marker();
        let dir = utils_dir.display();
        match self {
            Self::Sh => format!(
                r#"{marker}
# Add utilities directory to PATH
UTIX_PATH="{dir}"
case ":${{PATH}}:" in
    *:"${{UTIX_PATH}}":*)
        ;;
    *)
        export PATH="$PATH:$UTIX_PATH"
        ;;
esac
{END_MARKER}
"#
            ),
            Self::Bash | Self::Zsh => format!(
                r#"{marker}
# Add utilities directory to PATH
UTIX_PATH="{dir}"
if [[ $PATH != *"${{UTIX_PATH}}"* ]]; then
    export PATH="$PATH:$UTIX_PATH"
fi
{END_MARKER}
"#
            ),
            Self::Fish => format!(
                r#"{marker}
# Add utilities directory to PATH
set -l utix_path "{dir}"
if not contains $utix_path $PATH
    set -gx --append PATH $utix_path
end
{END_MARKER}
"#
            ),
            Self::Nu => format!(
                r#"{marker}
# Add utilities directory to PATH
$env.UTIX_PATH = '{dir}'
if $env.UTIX_PATH not-in $env.path {{
    $env.path ++= [$env.UTIX_PATH]
}}
{END_MARKER}
"#
            ),
        }
    }

    /// One-line command a user can run by hand instead of editing the
    /// startup file.
    pub fn fallback_command(self, utils_dir: &Path) -> String {
        let dir = utils_dir.display();
        match self {
            Self::Sh | Self::Bash | Self::Zsh => format!(r#"export PATH="$PATH:{dir}""#),
            Self::Fish => format!(r#"set -gx --append PATH "{dir}""#),
            Self::Nu => format!(r#"$env.path ++= ["{dir}"]"#),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_name_accepts_the_fixed_set() {
        assert_eq!(Shell::from_name("sh").unwrap(), Shell::Sh);
        assert_eq!(Shell::from_name("bash").unwrap(), Shell::Bash);
        assert_eq!(Shell::from_name("zsh").unwrap(), Shell::Zsh);
        assert_eq!(Shell::from_name("fish").unwrap(), Shell::Fish);
        assert_eq!(Shell::from_name("nu").unwrap(), Shell::Nu);
    }

    #[test]
    fn from_name_is_exact_and_case_sensitive() {
        assert!(Shell::from_name("Bash").is_err());
        assert!(Shell::from_name("tcsh").is_err());
        assert!(Shell::from_name("bash5").is_err());
        assert!(Shell::from_name("").is_err());
    }

    #[test]
    fn unsupported_shell_error_names_the_shell() {
        let err = Shell::from_name("tcsh").unwrap_err();
        assert!(err.to_string().contains("tcsh"));
    }

    #[test]
    fn markers_are_distinct_and_collision_free() {
        for a in SHELLS {
            for b in SHELLS {
                if a == b {
                    continue;
                }
                assert_ne!(a.marker(), b.marker());
                assert!(
                    !a.marker().contains(b.marker()),
                    "{} marker contains {} marker",
                    a.name(),
                    b.name()
                );
            }
        }
    }

    #[test]
    fn snippet_starts_with_marker_and_ends_with_end_marker() {
        let dir = Path::new("/home/u/.local/share/utix/bin");
        for shell in SHELLS {
            let snippet = shell.snippet(dir);
            assert_eq!(snippet.lines().next(), Some(shell.marker()));
            assert_eq!(snippet.lines().last(), Some(END_MARKER));
            assert!(snippet.contains("/home/u/.local/share/utix/bin"));
            assert!(snippet.ends_with('\n'));
        }
    }

    #[test]
    fn bash_and_zsh_share_a_template_body() {
        let dir = Path::new("/home/u/.local/share/utix/bin");
        let strip_marker = |s: String| {
            s.lines().skip(1).collect::<Vec<_>>().join("\n")
        };
        assert_eq!(
            strip_marker(Shell::Bash.snippet(dir)),
            strip_marker(Shell::Zsh.snippet(dir))
        );
    }

    #[test]
    fn startup_files_under_home() {
        let home = Path::new("/home/u");
        assert_eq!(Shell::Sh.startup_file(home).unwrap(), home.join(".profile"));
        assert_eq!(Shell::Bash.startup_file(home).unwrap(), home.join(".bashrc"));
        assert_eq!(Shell::Zsh.startup_file(home).unwrap(), home.join(".zshrc"));
        assert_eq!(
            Shell::Fish.startup_file(home).unwrap(),
            home.join(".config").join("fish").join("config.fish")
        );
    }

    #[test]
    fn nu_startup_file_lives_under_the_config_dir() {
        // Nushell is the one dialect routed through the config dir; pin
        // it with the override variable so the test stays hermetic.
        unsafe { env::set_var("XDG_CONFIG_HOME", "/tmp/utix-test-config") };
        let rc = Shell::Nu.startup_file(Path::new("/home/u")).unwrap();
        assert_eq!(
            rc,
            Path::new("/tmp/utix-test-config").join("nushell").join("config.nu")
        );
    }

    #[test]
    fn fallback_commands_mention_the_directory() {
        let dir = Path::new("/home/u/.local/share/utix/bin");
        for shell in SHELLS {
            assert!(shell.fallback_command(dir).contains("/home/u/.local/share/utix/bin"));
        }
        assert!(Shell::Fish.fallback_command(dir).starts_with("set -gx"));
        assert!(Shell::Nu.fallback_command(dir).starts_with("$env.path"));
        assert!(Shell::Bash.fallback_command(dir).starts_with("export PATH"));
    }
}
