use serde_json::Value;
use std::path::Path;
use std::process::Command;

fn searchrank(home: &Path, args: &[&str]) -> Value {
    let output = Command::new(env!("CARGO_BIN_EXE_searchrank"))
        .env("HOME", home)
        .env("XDG_CONFIG_HOME", home.join("config"))
        .arg("--state-dir")
        .arg(home.join("state"))
        .args(args)
        .output()
        .unwrap();
    assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));
    serde_json::from_slice(&output.stdout).unwrap()
}

fn category_order(rows: &Value) -> Vec<(String, i64)> {
    rows.as_array()
        .unwrap()
        .iter()
        .map(|row| {
            (
                row["name"].as_str().unwrap().to_string(),
                row["priority"].as_i64().unwrap(),
            )
        })
        .collect()
}

#[test]
fn categories_up_moves_above_neighbour() {
    let home = tempfile::tempdir().unwrap();

    let rows = searchrank(home.path(), &["categories", "up", "Files"]);
    let order = category_order(&rows);
    assert_eq!(order[0], ("Files".to_string(), 1));
    assert_eq!(order[1], ("Applications".to_string(), 2));
    assert!(order.iter().all(|(name, _)| name != "Uygulamalar" && name != "Dosyalar"));

    for _ in 0..3 {
        searchrank(home.path(), &["categories", "up", "Web"]);
    }
    let names: Vec<String> = category_order(&searchrank(home.path(), &["categories"]))
        .into_iter()
        .map(|(name, _)| name)
        .collect();
    assert_eq!(
        names,
        vec!["Files", "Applications", "Web", "Documents", "Folders", "Calculator", "Other"]
    );
}

#[test]
fn categories_down_on_custom_name() {
    let home = tempfile::tempdir().unwrap();

    searchrank(home.path(), &["categories", "reorder", "Music", "Files", "Applications"]);
    let order = category_order(&searchrank(home.path(), &["categories", "down", "Music"]));
    assert_eq!(order[0], ("Files".to_string(), 1));
    assert_eq!(order[1], ("Music".to_string(), 2));
}

#[test]
fn rank_prints_pins_and_results() {
    let home = tempfile::tempdir().unwrap();
    let input = home.path().join("results.json");
    std::fs::write(
        &input,
        r#"[{"display":"calc.txt","category":"Files"},
            {"display":"Calculator","category":"Applications"}]"#,
    )
    .unwrap();

    let out = searchrank(
        home.path(),
        &["rank", "--query", "calc", "--input", input.to_str().unwrap()],
    );
    assert!(out["pinned"].as_array().unwrap().is_empty());
    let labels: Vec<&str> = out["results"]
        .as_array()
        .unwrap()
        .iter()
        .map(|r| r["display"].as_str().unwrap())
        .collect();
    assert_eq!(labels, vec!["Calculator", "calc.txt"]);
}
