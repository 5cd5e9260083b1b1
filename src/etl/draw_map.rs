use std::{fs::{self, File}, io::{BufReader, BufWriter, Write}, path::Path};

use log::info;
use png::{BitDepth, ColorType};
use raqote::DrawTarget;

use crate::{
    data::{
        canvas::pixel_color,
        map::{LoadedMap, TtdMap},
    },
    errors::{Error, ErrorKind, Result},
    UserConfig,
};

use super::Etl;

pub const ETL_NAME: &str = "draw_map";

/// Reads a map export, draws it and writes the picture as an RGB PNG.
pub struct DrawMapEtl<'a> {
    user_config: &'a UserConfig,
    /// Set once this run has created the output file.
    output_created: bool,
}

impl DrawMapEtl<'_> {
    pub fn new(user_config: &UserConfig) -> DrawMapEtl<'_> {
        DrawMapEtl {
            user_config,
            output_created: false,
        }
    }

    fn open_input(path: &Path) -> Result<BufReader<File>> {
        let file = File::open(path).map_err(|err| Error::new(
            ErrorKind::InputNotFound,
            format!("Could not open input file {}: {}", path.display(), err),
        ))?;
        Ok(BufReader::new(file))
    }
}

pub fn write_rgb_png<W: Write>(dt: &DrawTarget, out: W) -> Result<()> {
    let mut encoder = png::Encoder::new(
        out,
        u32::try_from(dt.width())?,
        u32::try_from(dt.height())?,
    );
    encoder.set_color(ColorType::Rgb);
    encoder.set_depth(BitDepth::Eight);

    let data: Vec<u8> = dt
        .get_data()
        .iter()
        .flat_map(|pixel| {
            let color = pixel_color(*pixel);
            [color.r, color.g, color.b]
        })
        .collect();

    let mut writer = encoder.write_header()?;
    writer.write_image_data(&data)?;
    writer.finish()?;
    Ok(())
}

impl<'a> Etl for DrawMapEtl<'a> {
    type Input = LoadedMap<BufReader<File>>;

    type Output = DrawTarget;

    fn etl_name(&self) -> &str {
        ETL_NAME
    }

    fn clean(&self) -> Result<()> {
        let output = &self.user_config.output;
        if self.output_created && output.exists() {
            fs::remove_file(output)?;
        }
        Ok(())
    }

    fn extract(&mut self) -> Result<Self::Input> {
        let map = TtdMap::new(self.user_config.pixel_size)?;
        let pixel_size = map.pixel_size();
        let loaded = map.load(Self::open_input(&self.user_config.input)?)?;
        let size = loaded.size();
        info!(
            etl_name = ETL_NAME,
            size_x = size.x,
            size_y = size.y,
            pixel_size = pixel_size,
            canvas_width = loaded.canvas_width();
            "Read map header"
        );
        Ok(loaded)
    }

    fn transform(&mut self, input: Self::Input) -> Result<Self::Output> {
        input.render()
    }

    fn load(&mut self, output: Self::Output) -> Result<()> {
        let file = File::create(&self.user_config.output)?;
        self.output_created = true;
        write_rgb_png(&output, BufWriter::new(file))?;
        let path = self.user_config.output.display().to_string();
        info!(etl_name = ETL_NAME, width = output.width(), path = path.as_str(); "Wrote picture");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use super::*;
    use crate::data::tile::Color;

    fn scratch_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir()
            .join(format!("openttd-map-{}-{}", name, std::process::id()));
        fs::create_dir_all(&dir).unwrap();
        dir
    }

    fn config(dir: &Path, input: &str, pixel_size: u32) -> UserConfig {
        let input_path = dir.join("map.txt");
        fs::write(&input_path, input).unwrap();
        UserConfig {
            input: input_path,
            output: dir.join("map.png"),
            pixel_size,
            log_level: "info".into(),
        }
    }

    fn decode(path: &Path) -> (png::OutputInfo, Vec<u8>) {
        let decoder = png::Decoder::new(File::open(path).unwrap());
        let mut reader = decoder.read_info().unwrap();
        let mut buf = vec![0; reader.output_buffer_size()];
        let info = reader.next_frame(&mut buf).unwrap();
        buf.truncate(info.buffer_size());
        (info, buf)
    }

    #[test]
    fn renders_png_of_expected_size() {
        let dir = scratch_dir("render");
        let user_config = config(&dir, "3;2\nrail;1;1;xy\nstation;2;1;x\n", 3);
        DrawMapEtl::new(&user_config).process().unwrap();

        let (info, data) = decode(&user_config.output);
        assert_eq!((info.width, info.height), (24, 24));
        assert_eq!(info.color_type, ColorType::Rgb);
        assert_eq!(info.bit_depth, BitDepth::Eight);
        assert_eq!(data.len(), 24 * 24 * 3);
        assert_eq!(&data[..3], &[Color::WHITE.r, Color::WHITE.g, Color::WHITE.b]);
        assert!(data.chunks(3).any(|px| px == [0u8, 0, 0]));
        fs::remove_dir_all(dir).unwrap();
    }

    #[test]
    fn unknown_tile_type_writes_no_output() {
        let dir = scratch_dir("unknown");
        let user_config = config(&dir, "2;2\nrail;0;0;x\nfoo;0;0\n", 3);
        let err = DrawMapEtl::new(&user_config).process().unwrap_err();
        assert_eq!(err.kind, ErrorKind::UnknownTileType);
        assert!(!user_config.output.exists());
        fs::remove_dir_all(dir).unwrap();
    }

    #[test]
    fn missing_input_is_reported() {
        let dir = scratch_dir("missing");
        let mut user_config = config(&dir, "", 3);
        user_config.input = dir.join("does-not-exist.txt");
        let err = DrawMapEtl::new(&user_config).process().unwrap_err();
        assert_eq!(err.kind, ErrorKind::InputNotFound);
        assert!(!user_config.output.exists());
        fs::remove_dir_all(dir).unwrap();
    }

    #[test]
    fn clean_keeps_output_it_did_not_create() {
        let dir = scratch_dir("keep");
        let user_config = config(&dir, "1;1\n", 2);
        fs::write(&user_config.output, "earlier picture").unwrap();

        let etl = DrawMapEtl::new(&user_config);
        etl.clean().unwrap();
        assert_eq!(fs::read_to_string(&user_config.output).unwrap(), "earlier picture");
        fs::remove_dir_all(dir).unwrap();
    }

    #[test]
    fn failed_load_keeps_existing_output() {
        let dir = scratch_dir("occupied");
        let mut user_config = config(&dir, "1;1\n", 2);
        // a directory in the output's place makes creating the file fail
        user_config.output = dir.join("taken");
        fs::create_dir_all(user_config.output.join("inner")).unwrap();

        let err = DrawMapEtl::new(&user_config).process().unwrap_err();
        assert_eq!(err.kind, ErrorKind::Io);
        assert!(user_config.output.join("inner").is_dir());
        fs::remove_dir_all(dir).unwrap();
    }

    #[test]
    fn clean_removes_output_of_this_run() {
        let dir = scratch_dir("partial");
        let user_config = config(&dir, "1;1\n", 2);
        let mut etl = DrawMapEtl::new(&user_config);
        let map = etl.extract().unwrap();
        let picture = etl.transform(map).unwrap();
        etl.load(picture).unwrap();
        assert!(user_config.output.exists());

        etl.clean().unwrap();
        assert!(!user_config.output.exists());
        fs::remove_dir_all(dir).unwrap();
    }

    #[test]
    fn failed_write_leaves_nothing_behind() {
        let dir = scratch_dir("badout");
        let mut user_config = config(&dir, "1;1\n", 2);
        user_config.output = dir.join("no-such-dir").join("map.png");
        let err = DrawMapEtl::new(&user_config).process().unwrap_err();
        assert_eq!(err.kind, ErrorKind::Io);
        assert!(!user_config.output.exists());
        fs::remove_dir_all(dir).unwrap();
    }
}
