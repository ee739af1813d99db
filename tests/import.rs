mod common;

use assert_cmd::Command;
use predicates::str::contains;

use common::{DUPLICATE_EXPORT, TestWorkspace, read_store_json};

fn bin() -> Command {
    Command::cargo_bin("order-managed").expect("binary exists")
}

#[test]
fn import_merges_duplicate_mobiles_last_row_wins() {
    let ws = TestWorkspace::new();
    let input = ws.write("export.csv", DUPLICATE_EXPORT);
    let store = ws.file("orders.json");

    bin()
        .args([
            "import",
            "-i",
            input.to_str().unwrap(),
            "-s",
            store.to_str().unwrap(),
        ])
        .assert()
        .success();

    let orders = read_store_json(&store);
    let orders = orders.as_array().expect("store is a JSON array");
    assert_eq!(orders.len(), 1);
    assert_eq!(orders[0]["fullName"], "Asha K");
    assert_eq!(orders[0]["size"], "L");
    assert_eq!(orders[0]["mobile"], "9876543210");
    assert_eq!(orders[0]["amount"], 300.0);
    assert_eq!(orders[0]["paymentStatus"], false);
}

#[test]
fn reimport_is_idempotent_on_disk() {
    let ws = TestWorkspace::new();
    let input = ws.write("export.csv", DUPLICATE_EXPORT);
    let store = ws.file("orders.json");

    for _ in 0..2 {
        bin()
            .args([
                "import",
                "-i",
                input.to_str().unwrap(),
                "-s",
                store.to_str().unwrap(),
            ])
            .assert()
            .success();
    }

    let orders = read_store_json(&store);
    assert_eq!(orders.as_array().expect("array").len(), 1);
}

#[test]
fn reimport_preserves_payment_status() {
    let ws = TestWorkspace::new();
    let input = ws.write("export.csv", DUPLICATE_EXPORT);
    let store = ws.file("orders.json");

    bin()
        .args([
            "import",
            "-i",
            input.to_str().unwrap(),
            "-s",
            store.to_str().unwrap(),
        ])
        .assert()
        .success();
    bin()
        .args([
            "payment",
            "9876543210",
            "--status",
            "paid",
            "-s",
            store.to_str().unwrap(),
        ])
        .assert()
        .success();

    let renamed = DUPLICATE_EXPORT.replace("Asha K", "Asha Kumari");
    let input = ws.write("export2.csv", &renamed);
    bin()
        .args([
            "import",
            "-i",
            input.to_str().unwrap(),
            "-s",
            store.to_str().unwrap(),
        ])
        .assert()
        .success();

    let orders = read_store_json(&store);
    let orders = orders.as_array().expect("array");
    assert_eq!(orders.len(), 1);
    assert_eq!(orders[0]["fullName"], "Asha Kumari");
    assert_eq!(orders[0]["paymentStatus"], true);
}

#[test]
fn import_uses_settings_price_for_new_orders() {
    let ws = TestWorkspace::new();
    let input = ws.write("export.csv", DUPLICATE_EXPORT);
    let settings = ws.write("settings.json", r#"{"tshirt_price": "450"}"#);
    let store = ws.file("orders.json");

    bin()
        .args([
            "import",
            "-i",
            input.to_str().unwrap(),
            "-s",
            store.to_str().unwrap(),
            "--settings",
            settings.to_str().unwrap(),
        ])
        .assert()
        .success();

    let orders = read_store_json(&store);
    assert_eq!(orders.as_array().expect("array")[0]["amount"], 450.0);
}

#[test]
fn skipped_rows_do_not_fail_the_run() {
    let ws = TestWorkspace::new();
    let input = ws.write(
        "export.csv",
        "Timestamp,Name,Tshirt,Size,Mobile\n\
         short,row\n\
         2024-01-01,Asha,Asha,M,9876543210\n\
         2024-01-02,Ravi,Ravi,XL,\n",
    );
    let store = ws.file("orders.json");

    bin()
        .args([
            "import",
            "-i",
            input.to_str().unwrap(),
            "-s",
            store.to_str().unwrap(),
        ])
        .assert()
        .success();

    let orders = read_store_json(&store);
    assert_eq!(orders.as_array().expect("array").len(), 1);
}

#[test]
fn missing_input_file_is_fatal() {
    let ws = TestWorkspace::new();
    let store = ws.file("orders.json");

    bin()
        .args([
            "import",
            "-i",
            ws.file("no-such-export.csv").to_str().unwrap(),
            "-s",
            store.to_str().unwrap(),
        ])
        .assert()
        .failure()
        .stderr(contains("no-such-export.csv"));
    assert!(!store.exists());
}

#[test]
fn malformed_store_file_is_fatal() {
    let ws = TestWorkspace::new();
    let input = ws.write("export.csv", DUPLICATE_EXPORT);
    let store = ws.write("orders.json", "not json at all");

    bin()
        .args([
            "import",
            "-i",
            input.to_str().unwrap(),
            "-s",
            store.to_str().unwrap(),
        ])
        .assert()
        .failure()
        .stderr(contains("not valid JSON"));
    // The broken store is left as-is for the operator to inspect.
    assert_eq!(ws.read("orders.json"), "not json at all");
}

#[test]
fn dry_run_touches_nothing() {
    let ws = TestWorkspace::new();
    let input = ws.write("export.csv", DUPLICATE_EXPORT);
    let store = ws.file("orders.json");

    bin()
        .args([
            "import",
            "-i",
            input.to_str().unwrap(),
            "-s",
            store.to_str().unwrap(),
            "--dry-run",
        ])
        .assert()
        .success();
    assert!(!store.exists());
}

#[test]
fn import_reads_stdin_with_dash() {
    let ws = TestWorkspace::new();
    let store = ws.file("orders.json");

    bin()
        .args(["import", "-i", "-", "-s", store.to_str().unwrap()])
        .write_stdin(DUPLICATE_EXPORT)
        .assert()
        .success();

    let orders = read_store_json(&store);
    assert_eq!(orders.as_array().expect("array").len(), 1);
}
