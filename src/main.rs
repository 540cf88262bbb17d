#![warn(clippy::pedantic, elided_lifetimes_in_paths, explicit_outlives_requirements)]
#![allow(non_snake_case)]

use {
	clap::Parser,
	const_format::concatcp,
	log::info,
	read_sprites::sprites,
	std::{
		ffi::OsString,
		io::{self, BufWriter, Write},
		path::PathBuf,
		process::ExitCode,
	},
};

const BIN_NAME: &str = "read-sprites";
const USAGE: &str = concatcp!("usage: ", BIN_NAME, " <filename>");

fn main() -> ExitCode {
	env_logger::init();

	/// Prints the 16x16 tiles of a paletted PNG as hexadecimal palette indices.
	#[derive(Parser)]
	#[clap(name = BIN_NAME, version)]
	struct Args {
		#[clap(value_parser, allow_hyphen_values = true)]
		filename: Option<PathBuf>,

		#[clap(value_parser, hide = true)]
		ignored: Vec<OsString>,
	}
	let Args { filename, .. } = Args::parse();
	let Some(filename) = filename else {
		println!("{USAGE}");
		return ExitCode::FAILURE;
	};

	let stdout = &mut BufWriter::new(io::stdout().lock());
	let result = sprites::dump(&filename, stdout).and_then(|numTiles| {
		stdout.flush()?;
		Ok(numTiles)
	});
	match result {
		Ok(numTiles) => {
			info!("{filename:?}: {numTiles} tiles");
			ExitCode::SUCCESS
		}
		Err(err) => {
			_ = stdout.flush();
			_ = writeln!(stdout, "Error: {err}");
			_ = stdout.flush();
			ExitCode::FAILURE
		}
	}
}
