#![warn(clippy::pedantic, elided_lifetimes_in_paths, explicit_outlives_requirements)]
#![allow(non_snake_case)]

use {
	png::ColorType,
	sprites::SpriteError,
	std::io::Read,
};

pub const TILE_SIZE: usize = 16;

pub type Point = [usize; 2];
pub const X: usize = 0;
pub const Y: usize = 1;

/// Palette indices, one byte per pixel, row-major.
pub struct Image {
	pub width: usize,
	pub height: usize,
	pub data: Vec<u8>,
}

impl Image {
	pub fn fromWidthHeight(width: usize, height: usize) -> Self {
		Self { width, height, data: vec![0; width * height] }
	}

	/// Decodes the next frame of an indexed PNG. Depths below 8 are unpacked so that every
	/// pixel gets its own byte, same as with depth 8.
	pub fn fromIndexedPNG<R: Read>(png: &mut png::Reader<R>) -> Result<Self, SpriteError> {
		if png.info().color_type != ColorType::Indexed {
			return Err(SpriteError::NotPaletted);
		}
		let mut buffer = vec![0; png.output_buffer_size()];
		let frame = png.next_frame(&mut buffer)?;
		let mut image = Self::fromWidthHeight(frame.width as _, frame.height as _);
		let bitDepth = frame.bit_depth as usize;
		let mask = ((1_u16 << bitDepth) - 1) as u8;
		for (y, row) in image.data.chunks_exact_mut(image.width).enumerate() {
			let packed = &buffer[y * frame.line_size..][..frame.line_size];
			for (x, pixel) in row.iter_mut().enumerate() {
				let bit = x * bitDepth;
				// MSB-first
				let shift = u8::BITS as usize - bitDepth - bit % u8::BITS as usize;
				*pixel = packed[bit / u8::BITS as usize] >> shift & mask;
			}
		}
		Ok(image)
	}

	/// The 16 rows of the tile whose top-left corner is `origin`.
	///
	/// Panics if the tile runs past the edge of the image.
	pub fn tile(&self, origin: Point) -> impl Iterator<Item = &[u8]> + '_ {
		self.data[origin[Y] * self.width..]
			.chunks(self.width)
			.take(TILE_SIZE)
			.map(move |row| &row[origin[X]..][..TILE_SIZE])
	}
}

/// Tile origins, left to right, then top to bottom.
pub struct TilesIterator {
	width: usize,
	height: usize,
	next: Point,
}

impl TilesIterator {
	pub fn new(image: &Image) -> Self {
		Self { width: image.width, height: image.height, next: [0, 0] }
	}
}

impl Iterator for TilesIterator {
	type Item = Point;

	fn next(&mut self) -> Option<Point> {
		if self.width == 0 || self.next[Y] >= self.height {
			return None;
		}
		let point = self.next;
		self.next[X] += TILE_SIZE;
		if self.next[X] >= self.width {
			self.next = [0, self.next[Y] + TILE_SIZE];
		}
		Some(point)
	}
}

pub mod sprites {
	use {
		super::{Image, TilesIterator, TILE_SIZE},
		log::debug,
		std::{
			fs::File,
			io::{self, BufReader, Write},
			path::{Path, PathBuf},
		},
		thiserror::Error,
	};

	#[derive(Debug, Error)]
	pub enum SpriteError {
		#[error("{path:?}: {source}")]
		Open { path: PathBuf, source: io::Error },

		#[error("{0}")]
		Decode(#[from] png::DecodingError),

		#[error("The PNG is not paletted.")]
		NotPaletted,

		#[error("The PNG is {width}x{height}, which is not a whole number of 16x16 tiles.")]
		Misaligned { width: usize, height: usize },

		#[error("{0}")]
		Output(#[from] io::Error),
	}

	/// Writes the sprite sheet at `path` to `out` as one `{ // n ... },` block per tile.
	/// Returns the number of tiles written.
	pub fn dump<W: Write>(path: &Path, out: &mut W) -> Result<usize, SpriteError> {
		let file = File::open(path).map_err(|source| SpriteError::Open { path: path.to_owned(), source })?;
		let mut decoder = png::Decoder::new(BufReader::new(file));
		decoder.set_transformations(png::Transformations::IDENTITY);
		let png = &mut decoder.read_info()?;
		{
			let info = png.info();
			debug!(
				"{path:?}: {}x{}, {:?}, {:?}, interlaced: {}",
				info.width, info.height, info.color_type, info.bit_depth, info.interlaced
			);
		}
		writeSprites(&Image::fromIndexedPNG(png)?, out)
	}

	pub fn writeSprites<W: Write>(image: &Image, out: &mut W) -> Result<usize, SpriteError> {
		let &Image { width, height, .. } = image;
		if width % TILE_SIZE != 0 || height % TILE_SIZE != 0 {
			return Err(SpriteError::Misaligned { width, height });
		}
		let mut numTiles = 0;
		for origin in TilesIterator::new(image) {
			writeln!(out, "{{ // {numTiles}")?;
			numTiles += 1;
			for row in image.tile(origin) {
				for pixel in row {
					write!(out, "0x{pixel:02X},")?;
				}
				writeln!(out)?;
			}
			writeln!(out, "}},")?;
		}
		Ok(numTiles)
	}
}
