use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn expenses(data_dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("expenses").unwrap();
    cmd.env("EXPENSE_TRACKER_DATA_DIR", data_dir.path())
        .env_remove("RUST_LOG");
    cmd
}

fn read_expenses(data_dir: &TempDir) -> serde_json::Value {
    let raw = std::fs::read_to_string(data_dir.path().join("data/gastos_fijos.json")).unwrap();
    serde_json::from_str(&raw).unwrap()
}

#[test]
fn init_seeds_default_categories() {
    let dir = TempDir::new().unwrap();

    expenses(&dir)
        .arg("init")
        .assert()
        .success()
        .stdout(predicate::str::contains("Initialization complete"));

    expenses(&dir)
        .args(["category", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Alimentación / Hogar"));

    assert!(dir.path().join("config.json").exists());
}

#[test]
fn add_toggle_and_balance() {
    let dir = TempDir::new().unwrap();

    expenses(&dir)
        .args(["expense", "add", "Alquiler", "700", "--month", "Octubre 2024"])
        .args(["--category", "Casa", "--date", "2024-10-01"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Added expense: Alquiler (700 €)"));

    expenses(&dir)
        .args(["expense", "add", "Luz", "60", "--month", "Octubre 2024"])
        .assert()
        .success();

    expenses(&dir)
        .args(["expense", "toggle", "0", "--month", "Octubre 2024"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Marked 'Alquiler' as paid"));

    expenses(&dir)
        .args(["expense", "balance", "--month", "octubre 2024"])
        .assert()
        .success()
        .stdout(predicate::str::contains("700 €"))
        .stdout(predicate::str::contains("760 €"));
}

#[test]
fn editing_one_month_keeps_the_other() {
    let dir = TempDir::new().unwrap();

    for (month, concept) in [
        ("Octubre 2024", "Agua"),
        ("Noviembre 2024", "Agua"),
        ("Noviembre 2024", "Gas"),
    ] {
        expenses(&dir)
            .args(["expense", "add", concept, "20", "--month", month])
            .assert()
            .success();
    }

    expenses(&dir)
        .args(["expense", "edit", "0", "--month", "Octubre 2024", "--amount", "25"])
        .assert()
        .success();

    expenses(&dir)
        .args(["expense", "delete", "0", "--month", "Octubre 2024"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Deleted expense: Agua"));

    let rows = read_expenses(&dir);
    let rows = rows.as_array().unwrap();
    assert_eq!(rows.len(), 2);
    assert!(rows.iter().all(|r| r["Mes"] == "Noviembre 2024"));
}

#[test]
fn rejected_input_is_a_warning() {
    let dir = TempDir::new().unwrap();

    expenses(&dir)
        .args(["expense", "add", "  ", "10", "--month", "Octubre 2024"])
        .assert()
        .success()
        .stderr(predicate::str::contains("Warning:"));

    expenses(&dir)
        .args(["expense", "add", "Luz", "-5", "--month", "Octubre 2024"])
        .assert()
        .success()
        .stderr(predicate::str::contains("Invalid amount"));

    expenses(&dir)
        .args(["category", "add", "Casa"])
        .assert()
        .success()
        .stderr(predicate::str::contains("Category already exists: Casa"));

    expenses(&dir)
        .args(["category", "remove", "Viajes"])
        .assert()
        .success()
        .stderr(predicate::str::contains("Warning:"));

    assert!(!dir.path().join("data/gastos_fijos.json").exists());
}

#[test]
fn event_range_expands_per_day() {
    let dir = TempDir::new().unwrap();

    expenses(&dir)
        .args(["event", "add", "Vacaciones", "--date", "2024-10-05"])
        .args(["--until", "2024-10-07", "--who", "Yo"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Added 3 events"));

    expenses(&dir)
        .args(["event", "list", "--from", "2024-10-06"])
        .assert()
        .success()
        .stdout(predicate::str::contains("2024-10-06"))
        .stdout(predicate::str::contains("2024-10-07"))
        .stdout(predicate::str::contains("2024-10-05").not());

    expenses(&dir)
        .args(["event", "add", "Viaje", "--date", "2024-10-07"])
        .args(["--until", "2024-10-05", "--who", "Yo"])
        .assert()
        .success()
        .stderr(predicate::str::contains("Warning:"));
}

#[test]
fn export_expenses_as_csv() {
    let dir = TempDir::new().unwrap();

    expenses(&dir)
        .args(["expense", "add", "Internet", "35", "--month", "Diciembre 2024"])
        .assert()
        .success();

    expenses(&dir)
        .args(["export", "expenses", "--format", "csv"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with(
            "Id,Mes,Concepto,Cantidad,Pagado,Categoría,Fecha",
        ))
        .stdout(predicate::str::contains("Diciembre 2024,Internet,35,false"));
}

#[test]
fn backup_and_restore() {
    let dir = TempDir::new().unwrap();

    expenses(&dir)
        .args(["category", "add", "Viajes"])
        .assert()
        .success();

    expenses(&dir)
        .args(["backup", "create"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Backup created: backup-"));

    expenses(&dir)
        .args(["category", "remove", "Viajes"])
        .assert()
        .success();

    expenses(&dir)
        .args(["backup", "restore", "latest", "--force"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Restored: categories"));

    expenses(&dir)
        .args(["category", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Viajes"));
}
