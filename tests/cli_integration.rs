use rust_xlsxwriter::Workbook;
use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;
use std::time::{SystemTime, UNIX_EPOCH};

fn unique_temp_dir(prefix: &str) -> PathBuf {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("time")
        .as_nanos();
    let dir = std::env::temp_dir().join(format!(
        "tripstats-{prefix}-{}-{nanos}",
        std::process::id()
    ));
    fs::create_dir_all(&dir).expect("create temp dir");
    dir
}

/// One invoice row: description text and amount cell
enum Amount {
    Number(f64),
    Text(&'static str),
}

fn write_invoice(path: &Path, rows: &[(&str, Amount)]) {
    let mut workbook = Workbook::new();
    let sheet = workbook.add_worksheet();
    sheet
        .write_string(0, 0, "Счет на оплату № 12 от 01.02.24")
        .expect("write title");
    sheet.write_string(3, 0, "№").expect("write header");
    sheet
        .write_string(3, 1, "Товары (работы, услуги)")
        .expect("write header");
    sheet.write_string(3, 2, "Сумма").expect("write header");
    for (i, (description, amount)) in rows.iter().enumerate() {
        let row = 4 + i as u32;
        sheet.write_number(row, 0, (i + 1) as f64).expect("write number");
        if !description.is_empty() {
            sheet.write_string(row, 1, *description).expect("write description");
        }
        match amount {
            Amount::Number(n) => {
                sheet.write_number(row, 2, *n).expect("write amount");
            }
            Amount::Text(t) if !t.is_empty() => {
                sheet.write_string(row, 2, *t).expect("write amount");
            }
            Amount::Text(_) => {}
        }
    }
    workbook.save(path).expect("save workbook");
}

fn standard_invoice(path: &Path) {
    write_invoice(
        path,
        &[
            (
                "Москва - Тверь, от 01.02.24, 123 регион, Иванов И.И.",
                Amount::Number(100.0),
            ),
            (
                "Тверь - Клин, от 03.02.24, 123 регион, Петров П.П.",
                Amount::Text("50,00"),
            ),
            (
                "Клин - Москва, от 05.02.24, 456 регион, Иванов И.И.",
                Amount::Text("30"),
            ),
            ("Итого", Amount::Number(180.0)),
        ],
    );
}

struct Env {
    root: PathBuf,
    store: PathBuf,
}

impl Env {
    fn new(prefix: &str) -> Self {
        let root = unique_temp_dir(prefix);
        let store = root.join("store").join("sessions.json");
        Env { root, store }
    }

    fn run(&self, args: &[&str]) -> (bool, Vec<u8>, Vec<u8>) {
        let bin = std::env::var("CARGO_BIN_EXE_tripstats").unwrap_or_else(|_| {
            let mut path = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
            path.push("target");
            path.push("debug");
            if cfg!(windows) {
                path.push("tripstats.exe");
            } else {
                path.push("tripstats");
            }
            path.to_string_lossy().into_owned()
        });
        let output = Command::new(bin)
            .arg("--store")
            .arg(&self.store)
            .args(args)
            .env("HOME", &self.root)
            .env("XDG_CONFIG_HOME", self.root.join("config"))
            .env("XDG_DATA_HOME", self.root.join("data"))
            .output()
            .expect("run tripstats");
        (output.status.success(), output.stdout, output.stderr)
    }

    fn json(&self, args: &[&str]) -> Value {
        let (ok, stdout, stderr) = self.run(args);
        assert!(ok, "stderr: {}", String::from_utf8_lossy(&stderr));
        serde_json::from_slice(&stdout).expect("json")
    }

    fn file(&self, name: &str) -> PathBuf {
        self.root.join(name)
    }
}

#[test]
fn load_then_stats() {
    let env = Env::new("stats");
    let invoice = env.file("feb.xlsx");
    standard_invoice(&invoice);

    let report = env.json(&["load", "--json", invoice.to_str().unwrap()]);
    assert_eq!(report["added"], 3);
    assert_eq!(report["total"], 3);
    assert_eq!(report["files"][0]["source"], "feb.xlsx");

    let stats = env.json(&["stats", "--json"]);
    assert_eq!(stats["trips"], 3);
    assert_eq!(stats["files"], 1);
    assert_eq!(stats["total_cost"].as_f64(), Some(180.0));
    assert_eq!(stats["distinct_plates"], 2);
    assert_eq!(stats["distinct_drivers"], 2);
    assert_eq!(stats["plates"][0]["plate"], "123");
    assert_eq!(stats["plates"][0]["trips"], 2);
    assert_eq!(stats["plates"][0]["cost"].as_f64(), Some(150.0));
}

#[test]
fn load_accumulates_across_runs() {
    let env = Env::new("accumulate");
    let invoice = env.file("feb.xlsx");
    standard_invoice(&invoice);

    env.json(&["load", "--json", invoice.to_str().unwrap()]);
    let report = env.json(&["load", "--json", invoice.to_str().unwrap()]);
    assert_eq!(report["added"], 3);
    assert_eq!(report["total"], 6);
}

#[test]
fn load_directory_continues_past_broken_files() {
    let env = Env::new("broken");
    let dir = env.file("inbox");
    fs::create_dir_all(&dir).expect("create inbox");
    standard_invoice(&dir.join("a.xlsx"));
    fs::write(dir.join("b.xlsx"), b"not a spreadsheet").expect("write junk");

    let mut no_table = Workbook::new();
    no_table
        .add_worksheet()
        .write_string(0, 0, "Акт сверки")
        .expect("write cell");
    no_table.save(dir.join("c.xlsx")).expect("save workbook");

    let report = env.json(&["load", "--json", dir.to_str().unwrap()]);
    let files = report["files"].as_array().expect("files");
    assert_eq!(files.len(), 3);
    assert_eq!(files[0]["added"], 3);
    assert!(files[1]["error"].is_string());
    assert_eq!(files[2]["added"], 0);
    assert!(files[2]["error"].is_null());
    assert_eq!(report["total"], 3);
}

#[test]
fn table_ends_after_blank_rows() {
    let env = Env::new("blank-run");
    let invoice = env.file("gap.xlsx");
    write_invoice(
        &invoice,
        &[
            (
                "Москва - Тверь, от 01.02.24, 123 регион, Иванов И.И.",
                Amount::Number(100.0),
            ),
            ("", Amount::Text("")),
            ("", Amount::Text("")),
            ("", Amount::Text("")),
            ("", Amount::Text("")),
            ("", Amount::Text("")),
            (
                "Тверь - Клин, от 03.02.24, 789 регион, Петров П.П.",
                Amount::Number(70.0),
            ),
        ],
    );

    let report = env.json(&["load", "--json", invoice.to_str().unwrap()]);
    assert_eq!(report["added"], 1);
}

#[test]
fn rows_without_plate_or_number_are_skipped() {
    let env = Env::new("skips");
    let invoice = env.file("mixed.xlsx");
    write_invoice(
        &invoice,
        &[
            (
                "Москва - Тверь, от 01.02.24, 123 регион, Иванов И.И.",
                Amount::Text("1 234,50"),
            ),
            ("Доставка, от 02.02.24, Петров П.П.", Amount::Number(10.0)),
            (
                "Тверь - Клин, от 03.02.24, 456 регион, Петров П.П.",
                Amount::Text("н/д"),
            ),
        ],
    );

    let report = env.json(&["load", "--json", invoice.to_str().unwrap()]);
    assert_eq!(report["added"], 1);

    let records = env.json(&["list", "--json"]);
    let arr = records.as_array().expect("array");
    assert_eq!(arr.len(), 1);
    assert_eq!(arr[0]["cost"].as_f64(), Some(1234.5));
    assert_eq!(arr[0]["plate"], "123");
    assert_eq!(arr[0]["driver"], "Иванов");
    assert_eq!(arr[0]["date"], "01.02.24");
    assert_eq!(arr[0]["route"], "Москва - Тверь");
}

#[test]
fn top_plate_and_driver_queries() {
    let env = Env::new("queries");
    let invoice = env.file("feb.xlsx");
    standard_invoice(&invoice);
    env.json(&["load", "--json", invoice.to_str().unwrap()]);

    let top = env.json(&["top", "--json", "-n", "1"]);
    assert_eq!(top["drivers"].as_array().expect("drivers").len(), 1);
    assert_eq!(top["drivers"][0]["driver"], "Иванов");
    assert_eq!(top["drivers"][0]["cost"].as_f64(), Some(130.0));
    assert_eq!(top["plates"][0]["plate"], "123");

    let plate = env.json(&["plate", "--json", "12"]);
    assert_eq!(plate["trips"], 2);
    assert_eq!(plate["total_cost"].as_f64(), Some(150.0));
    assert_eq!(plate["drivers"], serde_json::json!(["Иванов", "Петров"]));

    let driver = env.json(&["driver", "--json", "иванов"]);
    assert_eq!(driver["trips"], 2);
    assert_eq!(driver["plates"], serde_json::json!(["123", "456"]));

    let missing = env.json(&["driver", "--json", "Сидоров"]);
    assert_eq!(missing["trips"], 0);
}

#[test]
fn date_range_narrows_results() {
    let env = Env::new("dates");
    let invoice = env.file("feb.xlsx");
    standard_invoice(&invoice);
    env.json(&["load", "--json", invoice.to_str().unwrap()]);

    let stats = env.json(&["stats", "--json", "--since", "2024-02-02", "--until", "20240204"]);
    assert_eq!(stats["trips"], 1);
    assert_eq!(stats["total_cost"].as_f64(), Some(50.0));
}

#[test]
fn list_csv_export() {
    let env = Env::new("csv");
    let invoice = env.file("feb.xlsx");
    standard_invoice(&invoice);
    env.json(&["load", "--json", invoice.to_str().unwrap()]);

    let (ok, stdout, stderr) = env.run(&["list", "--csv", "--plate", "456"]);
    assert!(ok, "stderr: {}", String::from_utf8_lossy(&stderr));
    let csv = String::from_utf8(stdout).expect("utf8");
    let lines: Vec<_> = csv.lines().collect();
    assert_eq!(lines.len(), 2);
    assert_eq!(lines[0], "date,route,cost,plate,driver,source");
    assert_eq!(lines[1], "05.02.24,Клин - Москва,30.00,456,Иванов,feb.xlsx");
}

#[test]
fn sessions_are_isolated_and_clearable() {
    let env = Env::new("sessions");
    let invoice = env.file("feb.xlsx");
    standard_invoice(&invoice);
    env.json(&["load", "--json", "-S", "alice", invoice.to_str().unwrap()]);

    let bob = env.json(&["stats", "--json", "-S", "bob"]);
    assert_eq!(bob["trips"], 0);

    let cleared = env.json(&["clear", "--json", "-S", "alice"]);
    assert_eq!(cleared["removed"], 3);

    let again = env.json(&["clear", "--json", "-S", "alice"]);
    assert_eq!(again["removed"], 0);

    let (ok, stdout, _) = env.run(&["stats", "-S", "alice"]);
    assert!(ok);
    assert!(String::from_utf8_lossy(&stdout).contains("No trip data loaded."));
}

#[test]
fn invalid_date_is_an_error() {
    let env = Env::new("bad-date");
    let (ok, _, stderr) = env.run(&["stats", "--since", "yesterday"]);
    assert!(!ok);
    assert!(String::from_utf8_lossy(&stderr).contains("Invalid date"));
}

const FOREIGN_STORE: &str = r#"{"version":2,"sessions":{"other":[{"date":null,"route":"Тверь","cost":10.0,"plate":"999","driver":null,"source":"old.xlsx"}]}}"#;

#[test]
fn unreadable_store_is_never_overwritten() {
    let env = Env::new("foreign-store");
    let invoice = env.file("feb.xlsx");
    standard_invoice(&invoice);
    fs::create_dir_all(env.store.parent().expect("store dir")).expect("create store dir");
    fs::write(&env.store, FOREIGN_STORE).expect("seed store");

    let (ok, _, stderr) = env.run(&["load", "--json", invoice.to_str().unwrap()]);
    assert!(!ok);
    assert!(String::from_utf8_lossy(&stderr).contains("version 2, expected 1"));
    assert_eq!(fs::read_to_string(&env.store).expect("read store"), FOREIGN_STORE);

    let (ok, _, _) = env.run(&["clear", "-S", "other"]);
    assert!(!ok);
    assert_eq!(fs::read_to_string(&env.store).expect("read store"), FOREIGN_STORE);
}

#[test]
fn truncated_store_fails_queries() {
    let env = Env::new("truncated-store");
    fs::create_dir_all(env.store.parent().expect("store dir")).expect("create store dir");
    fs::write(&env.store, r#"{"version":1,"sessions":{"default":[{"da"#).expect("seed store");

    let (ok, _, stderr) = env.run(&["stats", "--json"]);
    assert!(!ok);
    assert!(String::from_utf8_lossy(&stderr).contains("unreadable"));
}

#[test]
fn load_keeps_other_sessions() {
    let env = Env::new("keep-sessions");
    let invoice = env.file("feb.xlsx");
    standard_invoice(&invoice);
    env.json(&["load", "--json", "-S", "other", invoice.to_str().unwrap()]);
    env.json(&["load", "--json", invoice.to_str().unwrap()]);

    let other = env.json(&["stats", "--json", "-S", "other"]);
    assert_eq!(other["trips"], 3);
    assert!(!env.store.with_file_name("sessions.json.tmp").exists());
}
