use indoc::indoc;
use std::fs;
use stringsgen::{
    AccessLevel, Catalog, DuplicatePolicy, EmitOptions, Error, GenerateOptions, generate,
};
use tempfile::TempDir;

const STRINGS: &str = indoc! {r#"
    /* Plain text */
    staticText = "Static text";
    section1.subsection1.staticText = "Static text in section 1";

    // Two arguments, the first one unlabeled
    section1.subsection2.dynamicText_:_param2 = "Some text with param1: %@ and param2: %d";
    "greeting_name" = "Hello %@";
"#};

const STRINGSDICT: &str = indoc! {r#"
    <?xml version="1.0" encoding="UTF-8"?>
    <!DOCTYPE plist PUBLIC "-//Apple//DTD PLIST 1.0//EN" "http://www.apple.com/DTDs/PropertyList-1.0.dtd">
    <plist version="1.0">
    <dict>
        <key>time.days_:</key>
        <dict>
            <key>NSStringLocalizedFormatKey</key>
            <string>%#@VARIABLE@</string>
            <key>VARIABLE</key>
            <dict>
                <key>NSStringFormatSpecTypeKey</key>
                <string>NSStringPluralRuleType</string>
                <key>NSStringFormatValueTypeKey</key>
                <string>d</string>
                <key>one</key>
                <string>1 day</string>
                <key>other</key>
                <string>%d days</string>
            </dict>
        </dict>
        <key>multivariable_string_int1_int2</key>
        <dict>
            <key>NSStringLocalizedFormatKey</key>
            <string>Multivariable string of %@ with %#@item1@ and %#@item2@</string>
            <key>item1</key>
            <dict>
                <key>NSStringFormatSpecTypeKey</key>
                <string>NSStringPluralRuleType</string>
                <key>NSStringFormatValueTypeKey</key>
                <string>d</string>
                <key>other</key>
                <string>%d item 1's</string>
            </dict>
            <key>item2</key>
            <dict>
                <key>NSStringFormatSpecTypeKey</key>
                <string>NSStringPluralRuleType</string>
                <key>NSStringFormatValueTypeKey</key>
                <string>ld</string>
                <key>other</key>
                <string>%ld item 2's</string>
            </dict>
        </dict>
    </dict>
    </plist>
"#};

fn write_sources(dir: &TempDir) -> (std::path::PathBuf, std::path::PathBuf) {
    let strings = dir.path().join("Localizable.strings");
    let stringsdict = dir.path().join("Localizable.stringsdict");
    fs::write(&strings, STRINGS).unwrap();
    fs::write(&stringsdict, STRINGSDICT).unwrap();
    (strings, stringsdict)
}

fn catalog(items: &[(&str, &str)]) -> Catalog {
    items
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

#[test]
fn test_generate_from_strings_and_stringsdict() {
    let dir = TempDir::new().unwrap();
    let (strings, stringsdict) = write_sources(&dir);

    let mut catalog = Catalog::new(DuplicatePolicy::Reject);
    catalog.read_file_by_extension(&strings).unwrap();
    catalog.read_file_by_extension(&stringsdict).unwrap();
    assert_eq!(catalog.len(), 6);

    let generated = generate(&catalog, &GenerateOptions::default()).unwrap();
    let expected = indoc! {r#"
        // This file is automatically generated by stringsgen.
        // Do not edit it manually, as your changes will be overwritten.

        import Foundation

        public struct LocalizedString {
            public static func greeting(name arg0: String) -> String {
                return String(format: NSLocalizedString("greeting_name", comment: ""), arg0)
            }
            public static func multivariable(string arg0: String, int1 arg1: Int, int2 arg2: Int) -> String {
                return String(format: NSLocalizedString("multivariable_string_int1_int2", comment: ""), arg0, arg1, arg2)
            }
            public static let staticText = NSLocalizedString("staticText", comment: "")

            public struct Section1 {

                public struct Subsection1 {
                    public static let staticText = NSLocalizedString("section1.subsection1.staticText", comment: "")
                }

                public struct Subsection2 {
                    public static func dynamicText(_ arg0: String, param2 arg1: Int) -> String {
                        return String(format: NSLocalizedString("section1.subsection2.dynamicText_:_param2", comment: ""), arg0, arg1)
                    }
                }
            }

            public struct Time {
                public static func days(_ arg0: Int) -> String {
                    return String(format: NSLocalizedString("time.days_:", comment: ""), arg0)
                }
            }
        }
    "#};
    assert_eq!(generated.contents, expected);
}

#[test]
fn test_debug_dump_of_generated_tree() {
    let dir = TempDir::new().unwrap();
    let (strings, _) = write_sources(&dir);

    let mut catalog = Catalog::default();
    catalog.read_file_by_extension(&strings).unwrap();
    let generated = generate(&catalog, &GenerateOptions::default()).unwrap();

    let dump = generated.tree.to_string();
    assert!(dump.contains("greeting_name(String)\n"));
    assert!(dump.contains("section1/\n"));
    assert!(dump.contains("    subsection2/\n        dynamicText_:_param2(String, Int)\n"));
}

#[test]
fn test_too_many_labels_is_an_error() {
    let err = generate(
        &catalog(&[("settings.title_a_b", "Only %@")]),
        &GenerateOptions::default(),
    )
    .unwrap_err();

    match err {
        Error::ArgumentCountMismatch {
            path,
            expected,
            found,
        } => {
            assert_eq!(path, "settings.title_a_b");
            assert_eq!(expected, 1);
            assert_eq!(found, 2);
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn test_too_few_labels_is_an_error() {
    let err = generate(
        &catalog(&[("summary_a", "%@ and %d")]),
        &GenerateOptions::default(),
    )
    .unwrap_err();
    assert_eq!(
        err.to_string(),
        "string for \"summary_a\" does not contain the correct number of arguments: expected 2, found 1"
    );
}

#[test]
fn test_keyword_names_are_escaped() {
    let generated = generate(
        &catalog(&[("class_name", "%@"), ("default", "Default")]),
        &GenerateOptions::default(),
    )
    .unwrap();
    assert!(
        generated
            .contents
            .contains("public static func `class`(name arg0: String) -> String {")
    );
    assert!(
        generated
            .contents
            .contains("public static let `default` = NSLocalizedString(\"default\", comment: \"\")")
    );
}

#[test]
fn test_escaped_percent_is_not_an_argument() {
    let generated = generate(
        &catalog(&[("progress_value", "%d%% done")]),
        &GenerateOptions::default(),
    )
    .unwrap();
    assert!(
        generated
            .contents
            .contains("public static func progress(value arg0: Int) -> String {")
    );
}

#[test]
fn test_custom_emit_options() {
    let options = GenerateOptions::new()
        .with_message("Regenerate with `stringsgen generate`.")
        .with_emit_options(EmitOptions {
            root_name: "L10n".to_string(),
            access: AccessLevel::Internal,
            package: true,
            table: Some("Settings".to_string()),
        });
    let generated = generate(&catalog(&[("title", "Title")]), &options).unwrap();

    let expected = indoc! {r#"
        // This file is automatically generated by stringsgen.
        // Do not edit it manually, as your changes will be overwritten.
        //
        // Regenerate with `stringsgen generate`.

        import Foundation

        struct L10n {
            static let title = NSLocalizedString("title", tableName: "Settings", bundle: .module, comment: "")
        }
    "#};
    assert_eq!(generated.contents, expected);
}

#[test]
fn test_duplicates_across_files() {
    let dir = TempDir::new().unwrap();
    let first = dir.path().join("First.strings");
    let second = dir.path().join("Second.strings");
    fs::write(&first, "\"title\" = \"One\";").unwrap();
    fs::write(&second, "\"title\" = \"Two %@\";").unwrap();

    let mut overwrite = Catalog::new(DuplicatePolicy::Overwrite);
    overwrite.read_file_by_extension(&first).unwrap();
    overwrite.read_file_by_extension(&second).unwrap();
    assert_eq!(overwrite.get("title"), Some("Two %@"));

    let mut reject = Catalog::new(DuplicatePolicy::Reject);
    reject.read_file_by_extension(&first).unwrap();
    let err = reject.read_file_by_extension(&second).unwrap_err();
    assert!(matches!(err, Error::DuplicateKey { ref key, .. } if key == "title"));
}

#[test]
fn test_empty_input_produces_empty_root() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("Empty.strings");
    fs::write(&path, "/* nothing here */\n").unwrap();

    let mut catalog = Catalog::default();
    catalog.read_file_by_extension(&path).unwrap();
    let generated = generate(&catalog, &GenerateOptions::default()).unwrap();
    assert!(
        generated
            .contents
            .ends_with("import Foundation\n\npublic struct LocalizedString {\n}\n")
    );
}

#[test]
fn test_repeated_and_trailing_underscores_add_no_arguments() {
    let generated = generate(
        &catalog(&[("count__items", "%d items")]),
        &GenerateOptions::default(),
    )
    .unwrap();
    assert!(
        generated
            .contents
            .contains("public static func count(items arg0: Int) -> String {")
    );

    let err = generate(
        &catalog(&[("days_", "%d days")]),
        &GenerateOptions::default(),
    )
    .unwrap_err();
    assert!(matches!(
        err,
        Error::ArgumentCountMismatch {
            expected: 1,
            found: 0,
            ..
        }
    ));

    let err = generate(
        &catalog(&[("a_b__", "%@ %@")]),
        &GenerateOptions::default(),
    )
    .unwrap_err();
    assert_eq!(
        err.to_string(),
        "string for \"a_b__\" does not contain the correct number of arguments: expected 2, found 1"
    );
}

#[test]
fn test_case_colliding_namespaces_are_reported() {
    let generated = generate(
        &catalog(&[("settings.title", "Title"), ("Settings.subtitle", "Subtitle")]),
        &GenerateOptions::default(),
    )
    .unwrap();
    assert_eq!(
        generated.tree.struct_name_collisions(),
        vec!["Settings".to_string(), "settings".to_string()]
    );
    assert_eq!(generated.contents.matches("public struct Settings {").count(), 2);
}
