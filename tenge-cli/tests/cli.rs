use std::fs;
use std::path::Path;
use std::process::{Command, Output};

use anyhow::Result;

const HALYK: &str = "\
ФИО: Иванов Иван Иванович
ИИН: 900101300123
Текущий счет KZ12601A123456789012 KZT
Дата проведения операции Описание Сумма
01.09.2025 Покупка в магазине -2500,00
05.09.2025 Такси Яндекс -1049,50
10.09.2025 Зарплата 100000,00
Всего: 96450,50
";

fn tenge(home: &Path, args: &[&str]) -> Result<Output> {
    Ok(Command::new(env!("CARGO_BIN_EXE_tenge"))
        .env("HOME", home)
        .args(args)
        .output()?)
}

#[test]
fn test_parse_json() -> Result<()> {
    let home = tempfile::tempdir()?;
    let statement = home.path().join("halyk.txt");
    fs::write(&statement, HALYK)?;

    let output = tenge(home.path(), &["parse", statement.to_str().unwrap()])?;
    assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));

    let json: serde_json::Value = serde_json::from_slice(&output.stdout)?;
    assert_eq!(json["header"]["client_name"], "Иванов Иван Иванович");
    assert_eq!(json["header"]["accounts"]["kzt"], "KZ12601A123456789012");

    let txns = json["transactions"].as_array().unwrap();
    assert_eq!(txns.len(), 3);
    assert_eq!(txns[0]["amount"], "2500.00");
    assert_eq!(txns[0]["direction"], "EXPENSE");
    assert_eq!(txns[0]["category"], "FOOD");
    assert_eq!(txns[2]["direction"], "INCOME");
    assert_eq!(txns[2]["category"], "SALARY");
    Ok(())
}

#[test]
fn test_parse_csv_ledger() -> Result<()> {
    let home = tempfile::tempdir()?;
    let statement = home.path().join("halyk.txt");
    fs::write(&statement, HALYK)?;

    let output = tenge(
        home.path(),
        &["parse", statement.to_str().unwrap(), "--format", "csv", "--owner", "user-42"],
    )?;
    assert!(output.status.success());

    let stdout = String::from_utf8(output.stdout)?;
    let mut lines = stdout.lines();
    assert_eq!(lines.next(), Some("owner_id,date,amount,currency,direction,category,description"));
    assert_eq!(
        lines.next(),
        Some("user-42,2025-09-01,2500.00,KZT,EXPENSE,FOOD,Покупка в магазине")
    );
    assert_eq!(lines.next(), Some("user-42,2025-09-05,1049.50,KZT,EXPENSE,TRANSPORT,Такси Яндекс"));
    assert_eq!(lines.next(), Some("user-42,2025-09-10,100000.00,KZT,INCOME,SALARY,Зарплата"));
    assert_eq!(lines.next(), None);
    Ok(())
}

#[test]
fn test_parse_summary() -> Result<()> {
    let home = tempfile::tempdir()?;
    let statement = home.path().join("halyk.txt");
    fs::write(&statement, HALYK)?;

    let args = ["parse", statement.to_str().unwrap(), "--format", "summary"];
    let output = tenge(home.path(), &args)?;
    assert!(output.status.success());

    let stdout = String::from_utf8(output.stdout)?;
    assert!(stdout.contains("Transactions: 3 (income: 1, expense: 2)"));
    assert!(stdout.contains("KZT: +100000.00 / -3549.50"));
    Ok(())
}

#[test]
fn test_parse_unsupported_format_fails() -> Result<()> {
    let home = tempfile::tempdir()?;
    let statement = home.path().join("halyk.csv");
    fs::write(&statement, HALYK)?;

    let output = tenge(home.path(), &["parse", statement.to_str().unwrap()])?;
    assert!(!output.status.success());
    assert!(output.stdout.is_empty());
    assert!(String::from_utf8_lossy(&output.stderr).contains("Unsupported statement format"));
    Ok(())
}

#[test]
fn test_check() -> Result<()> {
    let home = tempfile::tempdir()?;

    let ok = tenge(home.path(), &["check", "выписка.PDF"])?;
    assert!(ok.status.success());
    assert!(String::from_utf8(ok.stdout)?.contains("supported"));

    let bad = tenge(home.path(), &["check", "a.csv"])?;
    assert!(!bad.status.success());
    Ok(())
}

#[test]
fn test_config_init_and_show() -> Result<()> {
    let home = tempfile::tempdir()?;

    let init = tenge(home.path(), &["config", "init"])?;
    assert!(init.status.success());
    let written = fs::read_to_string(home.path().join(".tenge").join("config.toml"))?;
    assert!(written.contains("log_level = \"warn\""));
    assert!(written.contains("Asia/Almaty"));

    let show = tenge(home.path(), &["config", "show"])?;
    assert!(show.status.success());
    assert!(String::from_utf8(show.stdout)?.contains("Kaspi Gold"));
    Ok(())
}

#[test]
fn test_explicit_config_changes_kaspi_signatures() -> Result<()> {
    let home = tempfile::tempdir()?;
    let config = home.path().join("custom.toml");
    fs::write(&config, "[parser]\nkaspi_signatures = [\"MY BANK\"]\n")?;
    let statement = home.path().join("kaspi.txt");
    fs::write(&statement, "MY BANK\n04.10.25  - 110,00 ₸  Кафе Алматы\nДоп. инфо\n")?;

    let output = tenge(
        home.path(),
        &["--config", config.to_str().unwrap(), "parse", statement.to_str().unwrap()],
    )?;
    assert!(output.status.success());

    let json: serde_json::Value = serde_json::from_slice(&output.stdout)?;
    let txns = json["transactions"].as_array().unwrap();
    assert_eq!(txns.len(), 1);
    assert_eq!(txns[0]["description"], "Кафе Алматы Доп. инфо");
    Ok(())
}
