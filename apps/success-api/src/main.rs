use clap::Parser;

#[tokio::main]
async fn main() -> color_eyre::Result<()> {
	color_eyre::install()?;

	let args = success_api::Args::parse();

	success_api::run(args).await
}
