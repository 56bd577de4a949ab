fn main() {
    use deb822_lossless::FileElement;
    use std::str::FromStr;

    let input = r#"Package: deb822-lossless
Maintainer: Jelmer Vernooĳ <jelmer@debian.org>
Homepage: https://github.com/jelmer/deb822-lossless
Section: rust

Package: deb822-lossless
Architecture: any
Description: Lossless parser for deb822 style files.
  This parser can be used to parse files in the deb822 format, while preserving
  all whitespace and comments. It is based on the [rowan] library, which is a
  lossless parser library for Rust.
"#;

    let file = FileElement::from_str(input).unwrap();
    assert_eq!(file.iter_paragraphs().count(), 2);
    let homepage = file.iter_paragraphs().next().unwrap().get("Homepage").unwrap();
    assert_eq!(
        homepage.as_deref(),
        Some("https://github.com/jelmer/deb822-lossless")
    );
}
