use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use overlay_disk::{DiskConfig, OverlayProvisioner};
use vm_spec::VmInstance;

#[derive(Parser)]
#[command(name = "provision")]
struct Cli {
    /// JSON file holding the VM instance specification
    spec: PathBuf,
    /// Directory for per-volume overlay images
    #[arg(long, default_value = overlay_disk::DEFAULT_MOUNT_ROOT)]
    mount_root: PathBuf,
    /// Directory holding per-volume backing images
    #[arg(long, default_value = overlay_disk::DEFAULT_BACKING_ROOT)]
    backing_root: PathBuf,
    /// User that must own created overlay images
    #[arg(long, default_value = overlay_disk::DEFAULT_DISK_OWNER)]
    owner: String,
}

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt().init();

    let cli = Cli::parse();
    if let Err(e) = run(cli).await {
        eprintln!("error: {e}");
        return ExitCode::FAILURE;
    }
    ExitCode::SUCCESS
}

async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let spec = tokio::fs::read_to_string(&cli.spec).await?;
    let instance: VmInstance = serde_json::from_str(&spec)?;

    let provisioner = OverlayProvisioner::new(DiskConfig {
        mount_root: cli.mount_root,
        backing_root: cli.backing_root,
        owner: cli.owner,
    })?;
    provisioner.provision_instance(&instance).await?;

    println!("provisioned ephemeral volumes for {}", instance.name);
    Ok(())
}
