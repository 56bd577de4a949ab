use deb822_lossless::FileElement;
use std::str::FromStr;

fn main() {
    let d = FileElement::from_str(
        r#"Source: golang-github-blah-blah
Section: devel
Priority: optional
Standards-Version: 4.2.0
Maintainer: Some Maintainer <example@example.com>
Build-Depends: debhelper (>= 11~),  # comment
               dh-golang,
               golang-any
Homepage: https://github.com/j-keck/arping
"#,
    )
    .unwrap();

    let p = d.iter_paragraphs().next().unwrap();
    assert_eq!(
        "Some Maintainer <example@example.com>",
        p.get("Maintainer").unwrap().unwrap()
    );
    p.set_field_to_simple_value(
        "Maintainer",
        "Some Other Maintainer <blah@example.com>",
        Default::default(),
    )
    .unwrap();
    assert_eq!(
        "Some Other Maintainer <blah@example.com>",
        p.get("Maintainer").unwrap().unwrap()
    );

    assert_eq!(
        d.to_string(),
        r#"Source: golang-github-blah-blah
Section: devel
Priority: optional
Standards-Version: 4.2.0
Maintainer: Some Other Maintainer <blah@example.com>
Build-Depends: debhelper (>= 11~),  # comment
               dh-golang,
               golang-any
Homepage: https://github.com/j-keck/arping
"#
    );
}
