use assert_cmd::Command;
use predicates::str::contains;
use pretty_assertions::assert_eq;
use std::fs;
use std::path::Path;
use tempfile::tempdir;

fn studio(dir: &Path) -> Result<Command, Box<dyn std::error::Error>> {
    let mut cmd = Command::cargo_bin("studio")?;
    cmd.current_dir(dir)
        .env_remove("STUDIO_CATALOG_BACKEND")
        .env_remove("STUDIO_CATALOG_DIR")
        .env_remove("STUDIO_CATALOG_JSONL")
        .env_remove("RUST_LOG");
    Ok(cmd)
}

fn stdout_json(cmd: &mut Command) -> Result<serde_json::Value, Box<dyn std::error::Error>> {
    let out = cmd.assert().success().get_output().stdout.clone();
    Ok(serde_json::from_slice(&out)?)
}

#[test]
fn seed_then_query() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempdir()?;
    studio(dir.path())?
        .args(["projects", "seed"])
        .assert()
        .success()
        .stdout(contains("Seeded 6 projects"));
    assert!(dir.path().join(".studio/catalog.jsonl").exists());

    let listed = stdout_json(studio(dir.path())?.args(["projects", "list"]))?;
    let listed = listed.as_array().ok_or("list is not an array")?;
    assert_eq!(listed.len(), 4);
    assert!(listed.iter().all(|p| p["status"] == "published"));

    let fintech = stdout_json(studio(dir.path())?.args([
        "projects",
        "list",
        "--category",
        "fintech",
    ]))?;
    assert_eq!(fintech[0]["id"], "proj-001");

    let shown = stdout_json(studio(dir.path())?.args(["projects", "show", "pulse-fitness-tracker"]))?;
    assert_eq!(shown["id"], "proj-004");

    let stats = stdout_json(studio(dir.path())?.args(["projects", "stats"]))?;
    assert_eq!(stats["total"], 6);
    assert_eq!(stats["published"], 4);
    Ok(())
}

#[test]
fn create_rejects_project_without_images() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempdir()?;
    let input = dir.path().join("new.json");
    fs::write(
        &input,
        r#"{"title":"Quiet Studio","description":"A small site","category":"web","client":"Quiet","year":2024}"#,
    )?;
    studio(dir.path())?
        .args(["projects", "create", "--file"])
        .arg(&input)
        .assert()
        .failure()
        .stderr(contains("images: at least one image is required"));

    let listed = stdout_json(studio(dir.path())?.args(["projects", "list", "--status", "draft"]))?;
    assert_eq!(listed, serde_json::json!([]));
    Ok(())
}

#[test]
fn show_unknown_project_fails() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempdir()?;
    studio(dir.path())?
        .args(["projects", "show", "nope"])
        .assert()
        .failure()
        .stderr(contains("project not found: nope"));
    Ok(())
}

#[test]
fn compact_drops_repeated_ids() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempdir()?;
    studio(dir.path())?.args(["projects", "seed"]).assert().success();
    let seeded = fs::read_to_string(dir.path().join(".studio/catalog.jsonl"))?;
    let first = seeded.lines().next().ok_or("empty catalog")?;
    let input = dir.path().join("dirty.jsonl");
    let output = dir.path().join("clean.jsonl");
    fs::write(&input, format!("{seeded}{first}\nnot json\n"))?;

    studio(dir.path())?
        .args(["projects", "compact", "--input"])
        .arg(&input)
        .arg("--output")
        .arg(&output)
        .assert()
        .success()
        .stdout(contains("Read 8 entries, wrote 6 entries"));
    assert_eq!(fs::read_to_string(&output)?.lines().count(), 6);
    Ok(())
}

#[test]
fn contact_submission_lands_in_outbox() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempdir()?;
    fs::write(
        dir.path().join("studio.toml"),
        "[contact]\noutbox = \"outbox/inquiries.jsonl\"\n",
    )?;
    let submission = stdout_json(studio(dir.path())?.args([
        "contact",
        "submit",
        "--name",
        "Ada",
        "--email",
        "ada@example.com",
        "--project-type",
        "ui-ux",
        "--budget",
        "25k-50k",
        "--message",
        "We need a redesign",
    ]))?;
    assert_eq!(submission["status"], "pending");
    assert_eq!(submission["budget"], "25k-50k");

    let outbox = fs::read_to_string(dir.path().join("outbox/inquiries.jsonl"))?;
    assert_eq!(outbox.lines().count(), 1);
    assert!(outbox.contains("ada@example.com"));
    Ok(())
}

#[test]
fn simulate_recovers_after_sustained_good_windows() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempdir()?;
    let report = stdout_json(studio(dir.path())?.args([
        "perf",
        "simulate",
        "--fps",
        "20,60,60,60",
        "--particles",
        "100",
    ]))?;
    let levels: Vec<_> = report["windows"]
        .as_array()
        .ok_or("windows is not an array")?
        .iter()
        .map(|w| w["level"].as_str().unwrap_or_default().to_string())
        .collect();
    assert_eq!(levels, vec!["low", "low", "low", "high"]);
    assert_eq!(report["windows"][0]["particles"], 30);
    assert_eq!(report["windows"][0]["animation"]["skip_animations"], true);
    assert_eq!(report["device"]["is_low_end"], false);
    Ok(())
}

#[test]
fn simulate_slow_network_lowers_image_quality() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempdir()?;
    let report = stdout_json(studio(dir.path())?.args([
        "perf",
        "simulate",
        "--fps",
        "60",
        "--network",
        "2g",
        "--image",
        "https://cdn.example.com/hero.jpg",
        "--width",
        "800",
    ]))?;
    assert_eq!(report["device"]["is_low_end"], true);
    assert_eq!(
        report["image_url"],
        "https://cdn.example.com/hero.jpg?w=800&q=60"
    );
    Ok(())
}

#[test]
fn import_rejects_invalid_lines() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempdir()?;
    studio(dir.path())?.args(["projects", "seed"]).assert().success();
    let catalog = dir.path().join(".studio/catalog.jsonl");
    let before = fs::read_to_string(&catalog)?;
    let first = before.lines().next().ok_or("empty catalog")?;
    let mut bad: serde_json::Value = serde_json::from_str(first)?;
    bad["id"] = "proj-100".into();
    bad["slug"] = "Bad Slug".into();
    bad["images"] = serde_json::json!([]);

    studio(dir.path())?
        .args(["projects", "import"])
        .write_stdin(format!("{bad}\n"))
        .assert()
        .failure()
        .stderr(contains("projects[0].images"));
    assert_eq!(fs::read_to_string(&catalog)?, before);
    Ok(())
}
