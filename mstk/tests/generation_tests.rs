use indoc::indoc;
use mstk::{CsvLoader, Error, Generator, GeneratorKind, Project, Quantity, Resource, ResourceSet, Spreadsheet};
use std::fs;
use std::path::Path;
use tempfile::TempDir;

const SHEET: &str = indoc! {r#"
    options,fr,android_id,type,ios_id,en
    ,Bonjour,greeting,string,greeting,Hello
    ,,,string,,Nobody
    ,%d élément,count:one,plurals,,%d item
    ,%d éléments,count:other,plurals,,%d items
    ,Bleu,colors:1,string-array,,Blue
    ,Rouge,colors:0,string-array,,Red
    formatted,"Dites ""fromage""",cheese,string,cheese,"Say ""cheese"""
    ,C'est l'été,summer,string,summer,It's summer
"#};

fn write_project(dir: &Path, config: &str) {
    fs::write(dir.join("mst.cfg"), config).unwrap();
    fs::write(dir.join("strings.csv"), SHEET).unwrap();
}

fn rows() -> Vec<Vec<String>> {
    mstk::loader::read_rows(SHEET.as_bytes(), b',').unwrap()
}

#[test]
fn test_greeting_and_count_round_trip() {
    let rows = mstk::loader::read_rows(
        indoc! {"
            type,android_id,en,options
            string,greeting,Hello,
            plurals,count:one,%d item,
            plurals,count:other,%d items,
        "}
        .as_bytes(),
        b',',
    )
    .unwrap();
    let sheet = Spreadsheet::new("android_id", rows, &["en"]).unwrap();
    let resources: ResourceSet = sheet.extract_all().unwrap().into_iter().collect();

    let output = GeneratorKind::Android
        .create()
        .generate(&resources, "en")
        .unwrap();
    assert!(output.contains(r#"<string name="greeting">Hello</string>"#));
    assert_eq!(output.matches("<item quantity=").count(), 2);
    assert!(output.contains(r#"<item quantity="one">%d item</item>"#));
    assert!(output.contains(r#"<item quantity="other">%d items</item>"#));
}

#[test]
fn test_columns_in_any_order() {
    let sheet = Spreadsheet::new("android_id", rows(), &["en", "fr"]).unwrap();
    let strings = sheet.extract_strings().unwrap();
    let keys: Vec<&str> = strings.iter().map(|s| mstk::Keyed::key(s)).collect();
    assert_eq!(keys, vec!["greeting", "cheese", "summer"]);

    let arrays = sheet.extract_string_arrays().unwrap();
    let items: Vec<&str> = arrays[0]
        .items("fr")
        .unwrap()
        .into_iter()
        .map(|t| t.as_str())
        .collect();
    assert_eq!(items, vec!["Rouge", "Bleu"]);

    let plurals = sheet.extract_plural_strings().unwrap();
    assert_eq!(plurals[0].get("fr", Quantity::Other).unwrap(), "%d éléments");
    assert_eq!(plurals[0].get("fr", Quantity::Few).unwrap(), "");
}

#[test]
fn test_missing_language_fails_before_rows() {
    let mut rows = rows();
    rows.push(vec![
        "".to_string(),
        "".to_string(),
        "broken".to_string(),
        "string-array".to_string(),
    ]);
    match Spreadsheet::new("android_id", rows, &["en", "de"]) {
        Err(Error::MalformedHeader { column, header }) => {
            assert_eq!(column, "de");
            assert_eq!(header.len(), 6);
        }
        other => panic!("unexpected result: {:?}", other.map(|_| ())),
    }
}

#[test]
fn test_generate_android_project() {
    let dir = TempDir::new().unwrap();
    write_project(
        dir.path(),
        r#"{
            "generator": "android",
            "paths": {
                "en": "app/res/values/strings.xml",
                "fr": "app/res/values-fr/strings.xml"
            }
        }"#,
    );

    let project = Project::load(dir.path(), "mst.cfg").unwrap();
    let report = project
        .generate(&CsvLoader::new(dir.path().join("strings.csv")))
        .unwrap();
    assert_eq!(report.strings, 3);
    assert_eq!(report.string_arrays, 1);
    assert_eq!(report.plurals, 1);

    let en = fs::read_to_string(dir.path().join("app/res/values/strings.xml")).unwrap();
    assert!(en.contains(r"It\'s summer"));
    assert!(!en.contains("Nobody"));
    assert!(en.find("<item>Red</item>").unwrap() < en.find("<item>Blue</item>").unwrap());
    // sorted by key within each kind
    assert!(en.find("cheese").unwrap() < en.find("greeting").unwrap());

    let fr = fs::read_to_string(dir.path().join("app/res/values-fr/strings.xml")).unwrap();
    assert!(fr.contains(r"C\'est l\'été"));
}

#[test]
fn test_generate_apple_project() {
    let dir = TempDir::new().unwrap();
    write_project(
        dir.path(),
        r#"{
            "generator": "ios",
            "paths": {
                "en": "en.lproj/Localizable.strings",
                "fr": "fr.lproj/Localizable.strings"
            },
            "sorted": false
        }"#,
    );

    let project = Project::load(dir.path(), "mst.cfg").unwrap();
    project
        .generate(&CsvLoader::new(dir.path().join("strings.csv")))
        .unwrap();

    let fr = fs::read_to_string(dir.path().join("fr.lproj/Localizable.strings")).unwrap();
    assert_eq!(
        fr,
        "\"greeting\" = \"Bonjour\";\n\"cheese\" = \"Dites \\\"fromage\\\"\";\n\"summer\" = \"C'est l'été\";\n"
    );
}

#[test]
fn test_import_and_export_android_project() {
    let dir = TempDir::new().unwrap();
    write_project(
        dir.path(),
        r#"{
            "generator": "android_xml",
            "paths": {
                "en": "res/values/strings.xml",
                "fr": "res/values-fr/strings.xml"
            }
        }"#,
    );
    let project = Project::load(dir.path(), "mst.cfg").unwrap();
    project
        .generate(&CsvLoader::new(dir.path().join("strings.csv")))
        .unwrap();

    let imported = project.import_android().unwrap();
    assert_eq!(imported.len(), 5);
    let summer = imported
        .iter()
        .find(|resource| mstk::Keyed::key(*resource) == "summer")
        .unwrap();
    match summer {
        Resource::String(s) => assert_eq!(s.get("fr").unwrap(), "C'est l'été"),
        other => panic!("unexpected resource {}", other),
    }

    let out = dir.path().join("export/strings.csv");
    mstk::export::write_csv_file(&out, &imported, "android_id", &project.config().languages())
        .unwrap();

    let reloaded = mstk::loader::read_rows(fs::read(&out).unwrap().as_slice(), b',').unwrap();
    let languages = project.config().languages();
    let sheet = Spreadsheet::new("android_id", reloaded, languages.as_slice()).unwrap();
    assert_eq!(sheet.extract_all().unwrap().len(), 5);
}
