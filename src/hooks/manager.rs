// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! Hook manager for installing and removing the commit-msg hook.

use crate::error::{HookError, LintError, Result};
use crate::git;
use std::fs;
use std::path::{Path, PathBuf};

use super::templates::{HookTemplate, HOOK_MARKER};

/// Manager for git hooks.
pub struct HookManager {
    hooks_dir: PathBuf,
    args: Vec<String>,
}

impl HookManager {
    /// Create a hook manager for the current repository.
    ///
    /// `args` are appended to the `cmlint lint` call in generated hooks.
    pub fn new(args: Vec<String>) -> Result<Self> {
        let repo = git::open_repo()?;
        Self::with_hooks_dir(repo.hooks_dir(), args)
    }

    /// Create a hook manager for an explicit hooks directory.
    pub fn with_hooks_dir(hooks_dir: PathBuf, args: Vec<String>) -> Result<Self> {
        if !hooks_dir.exists() {
            fs::create_dir_all(&hooks_dir).map_err(|e| {
                LintError::Hook(HookError::InstallFailed {
                    hook: "all".to_string(),
                    message: format!("Failed to create hooks directory: {}", e),
                })
            })?;
        }

        Ok(Self { hooks_dir, args })
    }

    pub fn hooks_dir(&self) -> &Path {
        &self.hooks_dir
    }

    fn parse_hook(hook_name: &str) -> Result<HookTemplate> {
        hook_name.parse::<HookTemplate>().map_err(|_| {
            LintError::Hook(HookError::NotFound {
                hook: hook_name.to_string(),
            })
        })
    }

    /// Install a specific hook.
    pub fn install_hook(&self, hook_name: &str, force: bool) -> Result<()> {
        let template = Self::parse_hook(hook_name)?;
        self.install_template(template, force)
    }

    /// Install all hooks.
    pub fn install_all(&self, force: bool) -> Result<()> {
        for template in HookTemplate::all() {
            self.install_template(*template, force)?;
        }
        Ok(())
    }

    /// Install a hook from a template.
    ///
    /// A foreign hook is only replaced with `force`, and is kept as
    /// `<hook>.backup` so uninstalling restores it. An existing backup is
    /// never overwritten.
    fn install_template(&self, template: HookTemplate, force: bool) -> Result<()> {
        let name = template.filename();
        let hook_path = self.hooks_dir.join(name);
        let backup_path = self.hooks_dir.join(format!("{}.backup", name));
        let install_error = |message: String| {
            LintError::Hook(HookError::InstallFailed {
                hook: name.to_string(),
                message,
            })
        };

        if hook_path.exists() && !self.is_cmlint_hook(&hook_path)? {
            if !force {
                return Err(LintError::Hook(HookError::AlreadyExists {
                    hook: name.to_string(),
                }));
            }
            if backup_path.exists() {
                return Err(install_error(format!(
                    "{} already holds a backed up hook; move it away first",
                    backup_path.display()
                )));
            }
            tracing::info!("Backing up existing {} hook", name);
            fs::rename(&hook_path, &backup_path)
                .map_err(|e| install_error(format!("Failed to backup existing hook: {}", e)))?;
        }

        let script = template.render(&self.args)?;
        fs::write(&hook_path, &script)
            .map_err(|e| install_error(format!("Failed to write hook: {}", e)))?;

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;

            let mut perms = fs::metadata(&hook_path)
                .map_err(|e| install_error(format!("Failed to get permissions: {}", e)))?
                .permissions();
            perms.set_mode(0o755);
            fs::set_permissions(&hook_path, perms)
                .map_err(|e| install_error(format!("Failed to set permissions: {}", e)))?;
        }

        tracing::debug!("Installed hook at {:?}", hook_path);
        Ok(())
    }

    /// Uninstall a specific hook.
    pub fn uninstall_hook(&self, hook_name: &str) -> Result<()> {
        let template = Self::parse_hook(hook_name)?;
        let name = template.filename();
        let hook_path = self.hooks_dir.join(name);
        let backup_path = self.hooks_dir.join(format!("{}.backup", name));

        if !hook_path.exists() {
            return Ok(());
        }

        if !self.is_cmlint_hook(&hook_path)? {
            return Err(LintError::Hook(HookError::RemoveFailed {
                hook: hook_name.to_string(),
                message: "Hook was not installed by cmlint".to_string(),
            }));
        }

        fs::remove_file(&hook_path).map_err(|e| {
            LintError::Hook(HookError::RemoveFailed {
                hook: hook_name.to_string(),
                message: format!("Failed to remove hook: {}", e),
            })
        })?;

        if backup_path.exists() {
            fs::rename(&backup_path, &hook_path).map_err(|e| {
                LintError::Hook(HookError::RemoveFailed {
                    hook: hook_name.to_string(),
                    message: format!("Failed to restore backup: {}", e),
                })
            })?;
        }

        Ok(())
    }

    /// Uninstall all hooks.
    pub fn uninstall_all(&self) -> Result<()> {
        for template in HookTemplate::all() {
            self.uninstall_hook(template.filename())?;
        }
        Ok(())
    }

    /// Get the install status of all hooks.
    pub fn status(&self) -> Vec<(String, bool)> {
        HookTemplate::all()
            .iter()
            .map(|template| {
                let hook_path = self.hooks_dir.join(template.filename());
                let installed =
                    hook_path.exists() && self.is_cmlint_hook(&hook_path).unwrap_or(false);
                (template.filename().to_string(), installed)
            })
            .collect()
    }

    /// Check if a hook was installed by cmlint.
    fn is_cmlint_hook(&self, path: &Path) -> Result<bool> {
        let content = fs::read_to_string(path).map_err(|e| {
            LintError::Hook(HookError::InstallFailed {
                hook: path.display().to_string(),
                message: format!("Failed to read hook: {}", e),
            })
        })?;

        Ok(content.contains(HOOK_MARKER))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn manager(dir: &TempDir) -> HookManager {
        HookManager::with_hooks_dir(dir.path().join("hooks"), Vec::new()).unwrap()
    }

    #[test]
    fn test_install_and_status() {
        let dir = TempDir::new().unwrap();
        let manager = manager(&dir);

        assert_eq!(manager.status(), vec![("commit-msg".to_string(), false)]);
        manager.install_all(false).unwrap();
        assert_eq!(manager.status(), vec![("commit-msg".to_string(), true)]);

        // Reinstalling over our own hook needs no force
        manager.install_hook("commit-msg", false).unwrap();
    }

    #[cfg(unix)]
    #[test]
    fn test_installed_hook_is_executable() {
        use std::os::unix::fs::PermissionsExt;

        let dir = TempDir::new().unwrap();
        let manager = manager(&dir);
        manager.install_hook("commit-msg", false).unwrap();

        let mode = fs::metadata(manager.hooks_dir().join("commit-msg"))
            .unwrap()
            .permissions()
            .mode();
        assert_eq!(mode & 0o111, 0o111);
    }

    #[test]
    fn test_foreign_hook_requires_force_and_is_restored() {
        let dir = TempDir::new().unwrap();
        let manager = manager(&dir);
        let hook_path = manager.hooks_dir().join("commit-msg");
        fs::write(&hook_path, "#!/bin/sh\necho custom\n").unwrap();

        let err = manager.install_hook("commit-msg", false).unwrap_err();
        assert!(matches!(err, LintError::Hook(HookError::AlreadyExists { .. })));

        manager.install_hook("commit-msg", true).unwrap();
        assert!(manager.hooks_dir().join("commit-msg.backup").exists());

        manager.uninstall_all().unwrap();
        let restored = fs::read_to_string(&hook_path).unwrap();
        assert!(restored.contains("echo custom"));
    }

    #[test]
    fn test_forced_install_keeps_existing_backup() {
        let dir = TempDir::new().unwrap();
        let manager = manager(&dir);
        let hook_path = manager.hooks_dir().join("commit-msg");
        let backup_path = manager.hooks_dir().join("commit-msg.backup");

        fs::write(&hook_path, "#!/bin/sh\necho first\n").unwrap();
        manager.install_hook("commit-msg", true).unwrap();

        // Another tool replaces our hook with its own
        fs::write(&hook_path, "#!/bin/sh\necho second\n").unwrap();
        let err = manager.install_hook("commit-msg", true).unwrap_err();
        assert!(matches!(err, LintError::Hook(HookError::InstallFailed { .. })));

        assert!(fs::read_to_string(&backup_path).unwrap().contains("echo first"));
        assert!(fs::read_to_string(&hook_path).unwrap().contains("echo second"));
    }

    #[test]
    fn test_uninstall_refuses_foreign_hook() {
        let dir = TempDir::new().unwrap();
        let manager = manager(&dir);
        fs::write(manager.hooks_dir().join("commit-msg"), "#!/bin/sh\n").unwrap();

        assert!(manager.uninstall_hook("commit-msg").is_err());
    }

    #[test]
    fn test_unknown_hook() {
        let dir = TempDir::new().unwrap();
        let err = manager(&dir).install_hook("pre-push", false).unwrap_err();
        assert!(matches!(err, LintError::Hook(HookError::NotFound { .. })));
    }
}
