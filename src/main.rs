use clap::Parser;
use env_logger::Env;
use simple_site::config::BuildOptions;
use simple_site::{generate, output};
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Parser)]
#[command(name = "simple-site")]
#[command(about = "Build a static HTML site from a page manifest and templates")]
#[command(long_about = "\
Build a static HTML site from a page manifest and templates

Input structure:

  site/
  ├── config.json          # Manifest (config.toml also accepted)
  ├── templates/           # Templates, referenced by name from the manifest
  │   └── index.html
  └── static/              # Optional, copied verbatim into the output root
      └── css/style.css

Manifest entries:

  [{ \"url\": \"/about/\", \"template\": \"about.html\", \"context\": { ... } }]

Each page is written to <output>/<url>/index.html. The output directory
must not exist yet.")]
#[command(version)]
struct Cli {
    /// Input directory
    input_dir: PathBuf,

    /// Output directory [default: generated_html]
    #[arg(short, long, value_name = "PATH")]
    output: Option<PathBuf>,

    /// Print a line for every file written
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> ExitCode {
    env_logger::init_from_env(Env::default().default_filter_or("warn"));
    let cli = Cli::parse();

    let options = BuildOptions::new(cli.input_dir).with_output_dir(cli.output);
    let verbose = cli.verbose;
    let result = generate::generate(&options, |event| {
        if verbose {
            for line in output::format_build_event(event) {
                println!("{}", line);
            }
        }
    });

    match result {
        Ok(summary) => {
            if verbose {
                for line in output::format_summary(&summary) {
                    println!("{}", line);
                }
            }
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}
