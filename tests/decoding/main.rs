use miniz_oxide::deflate::compress_to_vec_zlib;
use rgb_png::{
    decode_image, encode_image, filter_scanlines, load_and_validate, parse_header,
    write_container, Filter, Image, ImageHeader, Pixel, PixelGrid, PngError, RawContainer,
    SIGNATURE,
};

/// 4x4 truecolor image; rows use Sub, Up, Average and Paeth in that order. The image data is
/// split over two IDAT chunks with tEXt and pHYs chunks around them.
const FILE: &[u8] = include_bytes!("filters.png");

fn chunk(chunk_type: &[u8; 4], data: &[u8]) -> Vec<u8> {
    let mut hasher = crc32fast::Hasher::new();
    hasher.update(chunk_type);
    hasher.update(data);
    let mut bytes = (data.len() as u32).to_be_bytes().to_vec();
    bytes.extend(chunk_type);
    bytes.extend(data);
    bytes.extend(hasher.finalize().to_be_bytes());
    bytes
}

fn container(header: &ImageHeader, image_data: &[u8]) -> Vec<u8> {
    let mut bytes = SIGNATURE.to_vec();
    bytes.extend(chunk(b"IHDR", &header.serialize()));
    bytes.extend(chunk(b"IDAT", image_data));
    bytes.extend(chunk(b"IEND", &[]));
    bytes
}

fn render(grid: &PixelGrid) -> String {
    grid.rows()
        .iter()
        .map(|row| {
            row.iter()
                .map(|p| format!("{:02x}{:02x}{:02x}", p.red, p.green, p.blue))
                .collect::<Vec<_>>()
                .join(" ")
        })
        .collect::<Vec<_>>()
        .join("\n")
}

#[test]
fn test_decoding() {
    let container = RawContainer::new(FILE.to_vec());
    assert!(container.is_valid());
    let header = parse_header(&container).unwrap();
    assert_eq!(header, ImageHeader::truecolor(4, 4));
    let grid = decode_image(&container, &header).unwrap();
    insta::assert_snapshot!(render(&grid), @r###"
    00c807 3caa07 788c07 b46e07
    11cd07 4daf2f 899157 c5737f
    22d207 5eb457 9a96a7 d678f7
    33d707 6fb97f ab9bf7 e77d6f
    "###);
}

#[test]
fn image_entity_matches_free_functions() {
    let container = RawContainer::new(FILE.to_vec());
    let header = parse_header(&container).unwrap();
    let image = Image::from_bytes(FILE.to_vec(), "filters.png").decode().unwrap();
    assert_eq!(*image.header(), header);
    assert_eq!(*image.pixels(), decode_image(&container, &header).unwrap());
    assert_eq!(image.pixels().get(3, 3), Some(Pixel::new(231, 125, 111)));
}

#[test]
fn reencoded_image_keeps_one_channel() {
    let image = Image::from_bytes(FILE.to_vec(), "filters.png").decode().unwrap();
    for option in 0..3 {
        let kept = (option + 2) % 3;
        let bytes = image.encode(option).unwrap();
        let reencoded = Image::from_bytes(bytes, "reencoded").decode().unwrap();
        assert_eq!(reencoded.header(), image.header());
        for (row, original) in reencoded.pixels().rows().iter().zip(image.pixels().rows()) {
            for (pixel, original) in row.iter().zip(original) {
                for channel in 0..3 {
                    let expected = if channel == kept {
                        original.channels()[channel]
                    } else {
                        0
                    };
                    assert_eq!(pixel.channels()[channel], expected);
                }
            }
        }
    }
    // encoding works on a copy
    assert_eq!(image.pixels().get(0, 0), Some(Pixel::new(0, 200, 7)));
}

#[test]
fn identical_pixels_filtered_with_sub() {
    let grid = PixelGrid::filled(8, 1, Pixel::new(10, 20, 30));
    let header = ImageHeader::truecolor(8, 1);
    let scanlines = filter_scanlines(&grid, Filter::Sub);
    assert_eq!(scanlines[0], 1);
    let bytes = container(&header, &compress_to_vec_zlib(&scanlines, 6));
    let decoded = decode_image(&RawContainer::new(bytes), &header).unwrap();
    assert_eq!(decoded, grid);
}

#[test]
fn overlong_final_chunk_is_malformed() {
    // drop IEND and append an IDAT that claims more bytes than remain
    let mut bytes = FILE[..FILE.len() - 12].to_vec();
    bytes.extend(1000u32.to_be_bytes());
    bytes.extend(b"IDAT");
    bytes.extend([0; 16]);
    let container = RawContainer::new(bytes);
    let header = parse_header(&container).unwrap();
    assert!(matches!(
        decode_image(&container, &header),
        Err(PngError::MalformedContainer(_))
    ));
}

#[test]
fn short_image_data_is_truncated() {
    let header = ImageHeader::truecolor(2, 3);
    let scanlines = filter_scanlines(&PixelGrid::filled(2, 2, Pixel::default()), Filter::None);
    let bytes = container(&header, &compress_to_vec_zlib(&scanlines, 6));
    assert!(matches!(
        decode_image(&RawContainer::new(bytes), &header),
        Err(PngError::TruncatedScanlineData)
    ));
}

#[test]
fn header_width_far_beyond_image_data_is_truncated() {
    let header = ImageHeader::truecolor(4_000_000_000, 1);
    let bytes = container(&header, &compress_to_vec_zlib(&[0, 1, 2, 3], 6));
    let container = RawContainer::new(bytes);
    assert_eq!(parse_header(&container).unwrap().width, 4_000_000_000);
    assert!(matches!(
        decode_image(&container, &header),
        Err(PngError::TruncatedScanlineData)
    ));
}

#[test]
fn unknown_filter_type_fails_decoding() {
    let header = ImageHeader::truecolor(1, 1);
    let bytes = container(&header, &compress_to_vec_zlib(&[7, 1, 2, 3], 6));
    assert!(matches!(
        Image::from_bytes(bytes, "bad filter").decode(),
        Err(PngError::UnrecognizedFilterType(7))
    ));
}

#[test]
fn corrupt_image_data_fails_decompression() {
    let header = ImageHeader::truecolor(1, 1);
    let bytes = container(&header, &[0xde, 0xad, 0xbe, 0xef]);
    assert!(matches!(
        decode_image(&RawContainer::new(bytes), &header),
        Err(PngError::Compression(_))
    ));
}

#[test]
fn unsupported_layouts_are_rejected() {
    let header = ImageHeader {
        color_type: 6,
        ..ImageHeader::truecolor(1, 1)
    };
    let bytes = container(&header, &compress_to_vec_zlib(&[0, 1, 2, 3, 4], 6));
    assert!(matches!(
        Image::from_bytes(bytes, "rgba").decode(),
        Err(PngError::UnsupportedLayout(_))
    ));
}

#[test]
fn saved_file_loads_back() {
    let path = std::env::temp_dir().join(format!(
        "rgb-png-{}-roundtrip.png",
        std::process::id()
    ));
    let header = ImageHeader::truecolor(3, 1);
    let grid = PixelGrid::from_rows(vec![vec![
        Pixel::new(1, 2, 3),
        Pixel::new(4, 5, 6),
        Pixel::new(7, 8, 9),
    ]])
    .unwrap();
    write_container(&encode_image(&header, &grid, 1).unwrap(), &path).unwrap();

    let container = load_and_validate(&path).unwrap();
    std::fs::remove_file(&path).unwrap();
    assert!(container.is_valid());
    let decoded = decode_image(&container, &parse_header(&container).unwrap()).unwrap();
    assert_eq!(
        decoded.into_rows(),
        vec![vec![
            Pixel::new(1, 0, 0),
            Pixel::new(4, 0, 0),
            Pixel::new(7, 0, 0),
        ]]
    );
}

#[test]
fn missing_file_is_not_found() {
    assert!(matches!(
        load_and_validate("no/such/file.png"),
        Err(PngError::FileNotFound { .. })
    ));
}
