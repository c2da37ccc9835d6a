use std::io;
use std::path::PathBuf;
use std::process::ExitCode;
use anyhow::{bail, Context, Result};
use clap::{Args, Parser, Subcommand};
use log::{error, warn};
use sdk_bootstrap::download_configuration::{DownloadConfiguration, DEFAULT_MIN_CHUNK_SIZE, DEFAULT_USER_AGENT};
use sdk_bootstrap::downloader::Downloader;
use sdk_bootstrap::generator::{exit_code, ProjectGenerator};
use sdk_bootstrap::locate::{find_paths, paths_are_valid, search_roots, DEFAULT_ENGINE_BINARY};
use sdk_bootstrap::prompt::{collect_paths, yes_or_no};
use sdk_bootstrap::sdk::{
    check_debug_libs, check_sdk, DebugLibsStatus, Platform, SdkConfiguration, SdkStatus, DEFAULT_SDK_DIR,
    DEFAULT_SDK_ENV, DEFAULT_SDK_VERSION,
};

/// Build bootstrap helpers for the engine.
#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Download a single file with a progress bar
    Fetch(FetchArgs),
    /// Check the SDK, offer to download its installer, then run the project generator
    Setup(SetupArgs),
    /// Find the engine binaries to benchmark
    Locate(LocateArgs),
}

#[derive(Args, Debug)]
struct FetchArgs {
    url: String,
    path: PathBuf,

    #[arg(long, default_value = DEFAULT_USER_AGENT)]
    user_agent: String,

    /// Lower bound for the bytes between two progress redraws
    #[arg(long, default_value_t = DEFAULT_MIN_CHUNK_SIZE)]
    min_chunk_size: u64,
}

#[derive(Args, Debug)]
struct SetupArgs {
    #[arg(long, default_value = DEFAULT_SDK_VERSION)]
    sdk_version: String,

    /// Directory the installer is downloaded into
    #[arg(long, default_value = DEFAULT_SDK_DIR)]
    sdk_dir: PathBuf,

    /// Environment variable holding the SDK root
    #[arg(long, default_value = DEFAULT_SDK_ENV)]
    sdk_env: String,

    /// Require the SDK root path to contain the version
    #[arg(long)]
    strict_version: bool,

    /// Download the installer without asking
    #[arg(short, long)]
    yes: bool,

    #[arg(long, default_value = DEFAULT_USER_AGENT)]
    user_agent: String,

    /// Project generator to run once the SDK checks pass
    #[arg(long)]
    generator: Option<String>,

    #[arg(long = "generator-arg", allow_hyphen_values = true)]
    generator_args: Vec<String>,
}

#[derive(Args, Debug)]
struct LocateArgs {
    #[arg(long, default_value = DEFAULT_ENGINE_BINARY)]
    binary: String,

    /// Use these paths instead of asking
    #[arg(long)]
    path: Vec<PathBuf>,

    /// Search below these roots instead of every drive
    #[arg(long)]
    root: Vec<PathBuf>,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    let result = match cli.command {
        Commands::Fetch(args) => fetch(args).await,
        Commands::Setup(args) => setup(args).await,
        Commands::Locate(args) => locate(args),
    };

    match result {
        Ok(code) => code,
        Err(e) => {
            error!("{:#}", e);
            ExitCode::FAILURE
        }
    }
}

async fn fetch(args: FetchArgs) -> Result<ExitCode> {
    let config = DownloadConfiguration::new()
        .set_url(args.url)
        .set_file_path(args.path)
        .set_user_agent(args.user_agent)
        .set_min_chunk_size(args.min_chunk_size)
        .build()?;
    Downloader::new().download(&config).await?;
    Ok(ExitCode::SUCCESS)
}

async fn setup(args: SetupArgs) -> Result<ExitCode> {
    let config = SdkConfiguration {
        version: args.sdk_version.clone(),
        local_dir: args.sdk_dir.clone(),
        env_var: args.sdk_env.clone(),
        require_version_in_path: args.strict_version,
    };
    let platform = Platform::current();

    let sdk_root = match check_sdk(&config, config.sdk_root_from_env().as_deref()) {
        SdkStatus::Missing => {
            println!("You don't have the Vulkan SDK installed!");
            return offer_install(&config, platform, &args).await;
        }
        SdkStatus::WrongVersion(path) => {
            println!("Located Vulkan SDK at {}", path.display());
            println!("You don't have the correct Vulkan SDK version! (required version is {})", config.version);
            return offer_install(&config, platform, &args).await;
        }
        SdkStatus::Found(path) => {
            println!("Correct Vulkan SDK located at {}", path.display());
            path
        }
    };

    match check_debug_libs(&sdk_root, platform) {
        DebugLibsStatus::Found(path) => {
            println!("Correct Vulkan SDK Debug Libs found at {}", path.display());
        }
        DebugLibsStatus::Missing(path) => {
            println!("No Vulkan SDK debug libs found. (Checked {})", path.display());
            println!("Please install the Debug Libs as well by ticking the optional checkbox in the Vulkan installer.");
            return Ok(ExitCode::FAILURE);
        }
        DebugLibsStatus::Unsupported(platform) => {
            warn!("Debug lib check is not supported on {}", platform);
        }
    }

    let program = match &args.generator {
        Some(program) => program,
        None => return Ok(ExitCode::SUCCESS),
    };
    let status = ProjectGenerator::new(program.as_str())
        .args(args.generator_args.iter().cloned())
        .run()
        .await
        .with_context(|| format!("failed to start {}", program))?;

    Ok(ExitCode::from(exit_code(&status)))
}

async fn offer_install(config: &SdkConfiguration, platform: Platform, args: &SetupArgs) -> Result<ExitCode> {
    if !args.yes {
        let stdin = io::stdin();
        if !yes_or_no(&mut stdin.lock(), &mut io::stdout(), "Would you like to install the Vulkan SDK?")? {
            return Ok(ExitCode::FAILURE);
        }
    }

    let (url, path) = match (config.installer_url(platform), config.installer_path(platform)) {
        (Some(url), Some(path)) => (url, path),
        _ => bail!("The system {} is not yet supported", platform),
    };

    std::fs::create_dir_all(&config.local_dir)
        .with_context(|| format!("failed to create {}", config.local_dir.display()))?;

    println!("Downloading {} to {}", url, path.display());
    let download = DownloadConfiguration::new()
        .set_url(url)
        .set_file_path(&path)
        .set_user_agent(args.user_agent.as_str())
        .build()?;
    Downloader::new().download(&download).await?;
    println!("Done!");
    println!("Please run the installer at {} and restart this command after the installation", path.display());
    Ok(ExitCode::SUCCESS)
}

fn locate(args: LocateArgs) -> Result<ExitCode> {
    let stdin = io::stdin();
    let mut input = stdin.lock();
    let mut output = io::stdout();

    let paths: Vec<PathBuf> = if !args.path.is_empty() {
        args.path
    } else if yes_or_no(&mut input, &mut output, "Would you like to automatically detect the binary files of the engine?")? {
        println!("Searching for {} on your pc...", args.binary);
        let roots = if args.root.is_empty() { search_roots() } else { args.root };
        find_paths(&args.binary, &roots)
    } else {
        collect_paths(&mut input, &mut output)?.into_iter().map(PathBuf::from).collect()
    };

    // these paths may get executed by the benchmark, so they have to belong to the engine
    if !paths_are_valid(&paths, &args.binary) {
        println!("You did not enter paths that are part of the engine. Stop.");
        return Ok(ExitCode::FAILURE);
    }

    println!("these are your paths:");
    for path in &paths {
        println!("{}", path.display());
    }
    Ok(ExitCode::SUCCESS)
}
