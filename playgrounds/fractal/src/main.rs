use anyhow::Context;
use artifact::{bake, Loader};
use clap::{Parser, Subcommand};
use fractal_playground::{FractalConfig, SceneSummary};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "fractal", about = "Bakes and loads the fractal tree and star")]
struct Cli {
	/// TOML config; missing means defaults.
	#[arg(long, global = true, default_value = "fractal.toml")]
	config: PathBuf,

	#[command(subcommand)]
	command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
	/// Generate both artifacts and write them to disk.
	Bake {
		/// Output directory, overriding `[artifacts] dir`.
		#[arg(long)]
		out: Option<PathBuf>,
	},
	/// Read the artifacts, regenerating anything missing or malformed.
	Load {
		/// Artifact directory, overriding `[artifacts] dir`.
		#[arg(long)]
		dir: Option<PathBuf>,
	},
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), anyhow::Error> {
	let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
	tracing_subscriber::fmt().with_env_filter(filter).init();

	let cli = Cli::parse();
	let config = FractalConfig::load(&cli.config).await?;

	match cli.command {
		Command::Bake { out } => {
			let resolved = config.resolve(out.as_deref());
			let report = bake(&resolved.tree, &resolved.star, &resolved.artifacts)
				.await
				.context("baking artifacts")?;

			println!(
				"tree: {} instances, {} bytes -> {}",
				report.instance_count,
				report.tree_bytes,
				report.tree_path.display()
			);
			println!(
				"star: {} vertices, {} bytes -> {}",
				report.vertex_count,
				report.star_bytes,
				report.star_path.display()
			);
		}
		Command::Load { dir } => {
			let resolved = config.resolve(dir.as_deref());
			let scene = Loader::new(resolved.artifacts).load(&resolved.tree, &resolved.star).await;
			println!("{}", SceneSummary::new(&scene));
		}
	}

	Ok(())
}
