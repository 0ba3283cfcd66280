use std::path::PathBuf;

use clap::Parser;
use ggpack::{AppError, Config, INSTALLER_BASENAME, UNINSTALLER_BASENAME};

#[derive(Parser)]
#[command(name = "ggpack")]
#[command(version)]
#[command(
    about = "Package SFC build artifacts as AWS IoT Greengrass v2 components",
    long_about = None
)]
struct Cli {
    /// SFC build artifacts directory
    #[arg(short = 'd', long, default_value = "../../../build/distribution")]
    build_dir: PathBuf,
    /// Greengrass component basename
    #[arg(short = 'n', long, default_value = "com.amazon.sfc")]
    base_name: String,
    /// SFC Greengrass component version
    #[arg(long, default_value = "0.0.1")]
    component_version: String,
    /// Greengrass component S3 bucket
    #[arg(short = 'b', long, default_value = "s3://YOUR-S3-BUCKET")]
    bucket: String,
    /// Component name prefix directory
    #[arg(short = 'p', long, default_value = "latest")]
    prefix: String,
    /// Component name suffix
    #[arg(short = 's', long, default_value = "latest")]
    suffix: String,
    /// AWS region where components get registered
    #[arg(short = 'r', long, default_value = "your-aws-region")]
    region: String,
    /// Your AWS account id
    #[arg(short = 'a', long, default_value = "123456789")]
    account_id: String,
    /// Directory holding the recipe templates
    #[arg(long, default_value = "resources")]
    resources_dir: PathBuf,
}

impl From<Cli> for Config {
    fn from(cli: Cli) -> Self {
        Config {
            build_dir: cli.build_dir,
            base_name: cli.base_name,
            component_version: cli.component_version,
            bucket: cli.bucket,
            prefix: cli.prefix,
            suffix: cli.suffix,
            region: cli.region,
            account_id: cli.account_id,
            resources_dir: cli.resources_dir,
        }
    }
}

fn main() {
    let config = Config::from(Cli::parse());
    config.echo();

    let result: Result<(), AppError> = ggpack::run(&config).map(|report| {
        println!();
        println!("Packaged {} components under {}", report.modules.len(), config.prefix_dir().display());
        println!("--> In order to install into your aws account run: ./{INSTALLER_BASENAME}.sh|bat");
        println!("--> In order to uninstall all sfc components run : ./{UNINSTALLER_BASENAME}.sh|bat");
        println!();
    });

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
