//! Installer and uninstaller command-file emission.
//!
//! Commands are accumulated during recipe generation and written out as four
//! scripts: a `.sh` and `.bat` pair per role, sharing identical command text.
//! No shell-specific translation is performed.

use std::fs;
use std::path::{Path, PathBuf};

use crate::config::Config;
use crate::error::AppError;
use crate::modules::Module;

/// Basename of the generated installer script pair.
pub const INSTALLER_BASENAME: &str = "install-sfc-components";

/// Basename of the generated uninstaller script pair.
pub const UNINSTALLER_BASENAME: &str = "delete-sfc-components";

/// Ordered install and uninstall command lists for one packaging run.
#[derive(Debug, Clone, Default)]
pub struct CommandSet {
    /// Upload plus one create-component-version command per module.
    pub install: Vec<String>,
    /// One delete-component command per module.
    pub uninstall: Vec<String>,
}

impl CommandSet {
    /// Start a command set seeded with the one-off upload command.
    pub fn new(config: &Config) -> Self {
        Self { install: vec![upload_command(config)], uninstall: Vec::new() }
    }

    /// Append the install/uninstall command pair for one module.
    pub fn push_module(&mut self, config: &Config, module: &Module, recipe_file: &Path) {
        self.install.push(create_component_command(config, recipe_file));
        self.uninstall.push(delete_component_command(config, module));
    }
}

/// Command uploading the whole `<buildDir>/<prefix>` tree to the bucket.
pub fn upload_command(config: &Config) -> String {
    format!(
        "aws s3 cp --recursive  {} {}/{} --region {}",
        config.prefix_dir().display(),
        config.bucket,
        config.prefix,
        config.region
    )
}

/// Command registering one component version from its recipe file.
pub fn create_component_command(config: &Config, recipe_file: &Path) -> String {
    format!(
        "aws greengrassv2 create-component-version  --inline-recipe fileb://{} --region {}",
        recipe_file.display(),
        config.region
    )
}

/// Command deleting one registered component version by ARN.
pub fn delete_component_command(config: &Config, module: &Module) -> String {
    format!(
        "aws greengrassv2 delete-component --arn {} --region {}",
        config.component_arn(&module.name),
        config.region
    )
}

/// Write the four command scripts into `out_dir` and mark the `.sh` pair
/// owner-executable. Returns the written paths.
pub fn emit(out_dir: &Path, commands: &CommandSet) -> Result<Vec<PathBuf>, AppError> {
    let mut written = Vec::new();
    for (basename, cmds) in
        [(INSTALLER_BASENAME, &commands.install), (UNINSTALLER_BASENAME, &commands.uninstall)]
    {
        for extension in ["sh", "bat"] {
            let path = out_dir.join(format!("{basename}.{extension}"));
            write_command_file(&path, cmds, extension == "sh")?;
            written.push(path);
        }
    }
    Ok(written)
}

fn write_command_file(path: &Path, cmds: &[String], executable: bool) -> Result<(), AppError> {
    let mut content = String::new();
    for cmd in cmds {
        content.push_str(cmd);
        content.push('\n');
    }
    fs::write(path, content)?;

    if executable {
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let mut perms = fs::metadata(path)?.permissions();
            perms.set_mode(0o700);
            fs::set_permissions(path, perms)?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn config() -> Config {
        Config {
            build_dir: PathBuf::from("build"),
            base_name: "com.amazon.sfc".to_string(),
            component_version: "1.0.0".to_string(),
            bucket: "s3://my-bucket".to_string(),
            prefix: "latest".to_string(),
            suffix: "latest".to_string(),
            region: "eu-west-1".to_string(),
            account_id: "111122223333".to_string(),
            resources_dir: PathBuf::from("resources"),
        }
    }

    fn module(file_name: &str) -> Module {
        Module {
            name: crate::modules::module_name(file_name).unwrap().to_string(),
            file_name: file_name.to_string(),
            source: PathBuf::from("build").join(file_name),
        }
    }

    #[test]
    fn upload_command_copies_prefix_tree_into_bucket() {
        assert_eq!(
            upload_command(&config()),
            "aws s3 cp --recursive  build/latest s3://my-bucket/latest --region eu-west-1"
        );
    }

    #[test]
    fn create_command_references_recipe_file_and_region() {
        let config = config();
        let recipe = config.recipe_path("modbus");

        assert_eq!(
            create_component_command(&config, &recipe),
            "aws greengrassv2 create-component-version  --inline-recipe \
             fileb://build/latest/recipes/com.amazon.sfc.modbus-1.0.0.json --region eu-west-1"
        );
    }

    #[test]
    fn delete_command_references_component_arn() {
        assert_eq!(
            delete_component_command(&config(), &module("modbus.tar.gz")),
            "aws greengrassv2 delete-component --arn \
             arn:aws:greengrass:eu-west-1:111122223333:components:com.amazon.sfc.modbus:versions:1.0.0 \
             --region eu-west-1"
        );
    }

    #[test]
    fn command_set_stays_in_lockstep_per_module() {
        let config = config();
        let mut commands = CommandSet::new(&config);
        for file in ["modbus.tar.gz", "sfc-main.tar.gz"] {
            let module = module(file);
            let recipe = config.recipe_path(&module.name);
            commands.push_module(&config, &module, &recipe);
        }

        assert_eq!(commands.install.len(), 3);
        assert_eq!(commands.uninstall.len(), 2);
        assert!(commands.install[0].starts_with("aws s3 cp"));
    }

    #[test]
    fn emit_writes_identical_sh_and_bat_pairs() {
        let temp = tempdir().unwrap();
        let config = config();
        let mut commands = CommandSet::new(&config);
        let module = module("modbus.tar.gz");
        commands.push_module(&config, &module, &config.recipe_path(&module.name));

        let written = emit(temp.path(), &commands).unwrap();

        assert_eq!(written.len(), 4);
        let sh = fs::read_to_string(temp.path().join("install-sfc-components.sh")).unwrap();
        let bat = fs::read_to_string(temp.path().join("install-sfc-components.bat")).unwrap();
        assert_eq!(sh, bat);
        assert_eq!(sh.lines().count(), 2);

        let delete_sh = fs::read_to_string(temp.path().join("delete-sfc-components.sh")).unwrap();
        let delete_bat = fs::read_to_string(temp.path().join("delete-sfc-components.bat")).unwrap();
        assert_eq!(delete_sh, delete_bat);
        assert_eq!(delete_sh.lines().count(), 1);
    }

    #[cfg(unix)]
    #[test]
    fn emitted_shell_scripts_are_owner_executable() {
        use std::os::unix::fs::PermissionsExt;

        let temp = tempdir().unwrap();
        let config = config();
        let commands = CommandSet::new(&config);

        emit(temp.path(), &commands).unwrap();

        for basename in [INSTALLER_BASENAME, UNINSTALLER_BASENAME] {
            let sh_mode =
                fs::metadata(temp.path().join(format!("{basename}.sh"))).unwrap().permissions().mode();
            assert_eq!(sh_mode & 0o777, 0o700, "{basename}.sh should be owner rwx");

            let bat_mode = fs::metadata(temp.path().join(format!("{basename}.bat")))
                .unwrap()
                .permissions()
                .mode();
            assert_eq!(bat_mode & 0o111, 0, "{basename}.bat should not be executable");
        }
    }
}
