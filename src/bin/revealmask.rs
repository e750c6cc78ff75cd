use std::{
    fs::File,
    io::BufReader,
    path::{Path, PathBuf},
};

use anyhow::Context as _;
use clap::{Parser, Subcommand};
use revealmask::CellOrder as _;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "revealmask", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Generate a reveal mask and write it as a PNG.
    Generate(GenerateArgs),
    /// Print the cell-order table of a request.
    Steps(StepsArgs),
}

#[derive(Parser, Debug)]
struct GenerateArgs {
    /// Input request JSON.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Output PNG path.
    #[arg(long)]
    out: PathBuf,

    /// Composite rows in parallel.
    #[arg(long)]
    parallel: bool,

    /// Worker threads for parallel compositing (implies --parallel).
    #[arg(long)]
    threads: Option<usize>,
}

#[derive(Parser, Debug)]
struct StepsArgs {
    /// Input request JSON.
    #[arg(long = "in")]
    in_path: PathBuf,
}

fn main() -> anyhow::Result<()> {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.cmd {
        Command::Generate(args) => cmd_generate(args),
        Command::Steps(args) => cmd_steps(args),
    }
}

fn read_request_json(path: &Path) -> anyhow::Result<revealmask::MaskRequest> {
    let f = File::open(path).with_context(|| format!("open request '{}'", path.display()))?;
    let r = BufReader::new(f);
    let req: revealmask::MaskRequest =
        serde_json::from_reader(r).with_context(|| "parse request JSON")?;
    Ok(req)
}

fn cmd_generate(args: GenerateArgs) -> anyhow::Result<()> {
    let req = read_request_json(&args.in_path)?;
    req.validate()?;

    let mut threading = req.threading.clone();
    if args.parallel || args.threads.is_some() {
        threading.parallel = true;
    }
    if args.threads.is_some() {
        threading.threads = args.threads;
    }

    let particle_root = args.in_path.parent().unwrap_or_else(|| Path::new("."));
    let particle = revealmask::load_particle(&req, particle_root)?;
    let mask = revealmask::generate_mask(&req, &particle, &threading)?;

    if let Some(parent) = args.out.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }

    image::save_buffer_with_format(
        &args.out,
        &mask.data,
        mask.width,
        mask.height,
        image::ColorType::Rgba8,
        image::ImageFormat::Png,
    )
    .with_context(|| format!("write png '{}'", args.out.display()))?;

    eprintln!("wrote {}", args.out.display());
    Ok(())
}

fn cmd_steps(args: StepsArgs) -> anyhow::Result<()> {
    let req = read_request_json(&args.in_path)?;
    req.validate()?;

    let order = revealmask::build_order(&req)?;
    for row in revealmask::step_table(order.as_ref()) {
        let cells: Vec<String> = row.iter().map(|v| format!("{v:>7.3}")).collect();
        println!("{}", cells.join(" "));
    }
    println!("max_step = {}", order.max_step());
    Ok(())
}
