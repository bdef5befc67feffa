use serde_json::Value;
use std::fs;
use std::path::Path;
use std::process::{Command, Output};
use tempfile::TempDir;

const HC3N_CATALOG: &str = concat!(
    "    9097.0344  0.0500 -6.1074 3    0.0000  3 -510041404 1 1 0       0 0 0       \n",
    "   18194.9206  0.0500 -5.2055 3    0.3034  5 -510041404 1 2 0       1 0 0       \n",
);

fn run_spectron(args: &[&str], state: &Path) -> Output {
    let binary_path = env!("CARGO_BIN_EXE_spectron");
    Command::new(binary_path)
        .args(args)
        .arg("--state")
        .arg(state)
        .env("RUST_LOG", "off")
        .output()
        .expect("spectron binary should run")
}

fn write_file(path: &Path, content: &str) {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).expect("parent dir should be created");
    }
    fs::write(path, content).expect("file should be written");
}

fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).into_owned()
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

fn stage_uploads(root: &Path) -> (String, String) {
    let spectrum = root.join("uploads/orion.txt");
    let catalog = root.join("uploads/HC3N.cat");
    write_file(
        &spectrum,
        "Frequency\tIntensity\n9097.00\t0.0\n9097.03\t1.0\n9097.06\t0.0\n",
    );
    write_file(&catalog, HC3N_CATALOG);
    (
        spectrum.to_string_lossy().into_owned(),
        catalog.to_string_lossy().into_owned(),
    )
}

#[test]
fn upload_edit_render_round_trip() {
    let temp = TempDir::new().expect("tempdir should be created");
    let state = temp.path().join("session.json");
    let (spectrum, catalog) = stage_uploads(temp.path());

    let output = run_spectron(&["upload", &spectrum, &catalog], &state);
    assert!(output.status.success(), "upload failed: {}", stderr(&output));
    assert!(stdout(&output).contains("Loaded spectrum 'orion' (3 points)."));
    assert!(stdout(&output).contains("Loaded catalog 'HC3N' (2 transitions)."));
    assert!(state.exists(), "session state should be written");

    let output = run_spectron(&["edit", "HC3N", "temperature", "25"], &state);
    assert!(output.status.success(), "edit failed: {}", stderr(&output));

    let figure_path = temp.path().join("out/figure.json");
    let table_path = temp.path().join("out/series.tsv");
    fs::create_dir_all(temp.path().join("out")).expect("output dir should be created");
    let output = run_spectron(
        &[
            "render",
            "--output",
            &figure_path.to_string_lossy(),
            "--table",
            &table_path.to_string_lossy(),
        ],
        &state,
    );
    assert!(output.status.success(), "render failed: {}", stderr(&output));

    let figure: Value = serde_json::from_str(
        &fs::read_to_string(&figure_path).expect("figure should be written"),
    )
    .expect("figure should be JSON");
    let data = figure["data"].as_array().expect("data should be an array");
    assert_eq!(data.len(), 2);
    assert_eq!(data[0]["label"], "orion");
    assert_eq!(data[1]["label"], "HC3N");
    assert_eq!(data[1]["y"].as_array().map(Vec::len), Some(3));
    assert_eq!(figure["layout"]["yaxis"]["title"], "Flux (Jy/beam)");

    let table = fs::read_to_string(&table_path).expect("series table should be written");
    assert!(table.starts_with("Frequency (MHz)\torion\tHC3N\n"));
    assert_eq!(table.lines().count(), 4);

    let output = run_spectron(&["table"], &state);
    assert!(output.status.success());
    assert_eq!(
        stdout(&output),
        "Molecule,Temperature (K),Column Density (cm^-2),Doppler (km/s)\nHC3N,25,1e15,5\n"
    );
}

#[test]
fn invalid_edits_exit_with_input_errors() {
    let temp = TempDir::new().expect("tempdir should be created");
    let state = temp.path().join("session.json");
    let (_, catalog) = stage_uploads(temp.path());
    let output = run_spectron(&["upload", &catalog], &state);
    assert!(output.status.success(), "upload failed: {}", stderr(&output));
    let before = fs::read_to_string(&state).expect("state should exist");

    let output = run_spectron(&["edit", "HC3N", "doppler", "-1"], &state);
    assert_eq!(output.status.code(), Some(2));
    assert!(stderr(&output).contains("ERROR: [INPUT.INVALID_VALUE]"));

    let output = run_spectron(&["edit", "CO", "doppler", "1"], &state);
    assert_eq!(output.status.code(), Some(2));
    assert!(stderr(&output).contains("[INPUT.UNKNOWN_MOLECULE]"));

    let output = run_spectron(&["edit", "HC3N", "width", "1"], &state);
    assert_eq!(output.status.code(), Some(2));
    assert!(stderr(&output).contains("[INPUT.UNKNOWN_FIELD]"));

    let after = fs::read_to_string(&state).expect("state should exist");
    assert_eq!(before, after);
}

#[test]
fn batch_upload_keeps_good_files_and_reports_bad_ones() {
    let temp = TempDir::new().expect("tempdir should be created");
    let state = temp.path().join("session.json");
    let (_, catalog) = stage_uploads(temp.path());
    let broken = temp.path().join("uploads/broken.cat");
    write_file(&broken, "   100.0000  0.0500\n");
    let image = temp.path().join("uploads/plot.png");
    write_file(&image, "not a spectrum");

    let output = run_spectron(
        &[
            "upload",
            &catalog,
            &broken.to_string_lossy(),
            &image.to_string_lossy(),
        ],
        &state,
    );
    assert_eq!(output.status.code(), Some(2));
    let errors = stderr(&output);
    assert!(errors.contains("[INPUT.MALFORMED_CATALOG]"), "stderr: {errors}");
    assert!(errors.contains("[INPUT.UNSUPPORTED_UPLOAD]"), "stderr: {errors}");

    let output = run_spectron(&["table"], &state);
    assert_eq!(
        stdout(&output).lines().skip(1).collect::<Vec<_>>(),
        ["HC3N,300,1e15,5"]
    );
}

#[test]
fn unreadable_upload_does_not_discard_the_rest_of_the_batch() {
    let temp = TempDir::new().expect("tempdir should be created");
    let state = temp.path().join("session.json");
    let (spectrum, catalog) = stage_uploads(temp.path());
    let missing = temp.path().join("uploads/missing.cat");

    let output = run_spectron(
        &["upload", &spectrum, &catalog, &missing.to_string_lossy()],
        &state,
    );
    assert_eq!(output.status.code(), Some(2));
    assert!(stderr(&output).contains("ERROR: [IO.CLI]"), "stderr: {}", stderr(&output));
    assert!(stdout(&output).contains("Loaded spectrum 'orion' (3 points)."));
    assert!(stdout(&output).contains("Loaded catalog 'HC3N' (2 transitions)."));
    assert!(state.exists(), "session state should be written");

    let output = run_spectron(&["render"], &state);
    assert!(output.status.success(), "render failed: {}", stderr(&output));
    let figure: Value = serde_json::from_str(&stdout(&output)).expect("figure should be JSON");
    let labels: Vec<&str> = figure["data"]
        .as_array()
        .expect("data should be an array")
        .iter()
        .filter_map(|series| series["label"].as_str())
        .collect();
    assert_eq!(labels, ["orion", "HC3N"]);
}

#[test]
fn render_without_spectrum_has_no_series() {
    let temp = TempDir::new().expect("tempdir should be created");
    let state = temp.path().join("session.json");
    let (_, catalog) = stage_uploads(temp.path());
    run_spectron(&["upload", &catalog], &state);

    let output = run_spectron(&["render"], &state);
    assert!(output.status.success(), "render failed: {}", stderr(&output));
    let figure: Value = serde_json::from_str(&stdout(&output)).expect("figure should be JSON");
    assert_eq!(figure["data"].as_array().map(Vec::len), Some(0));
}

#[test]
fn config_defaults_seed_uploaded_catalogs() {
    let temp = TempDir::new().expect("tempdir should be created");
    let state = temp.path().join("session.json");
    let config = temp.path().join("spectron.json");
    write_file(&config, r#"{ "defaults": { "temperature": 75.0, "doppler": 1.5 } }"#);
    let (_, catalog) = stage_uploads(temp.path());

    let output = run_spectron(
        &["--config", &config.to_string_lossy(), "upload", &catalog],
        &state,
    );
    assert!(output.status.success(), "upload failed: {}", stderr(&output));

    let output = run_spectron(&["table"], &state);
    assert!(stdout(&output).contains("HC3N,75,1e15,1.5"));
}

#[test]
fn reset_recovers_a_corrupt_session() {
    let temp = TempDir::new().expect("tempdir should be created");
    let state = temp.path().join("session.json");
    write_file(&state, "{ not json");

    let output = run_spectron(&["table"], &state);
    assert_eq!(output.status.code(), Some(2));
    assert!(stderr(&output).contains("[INPUT.SESSION_STATE]"));

    let output = run_spectron(&["reset"], &state);
    assert!(output.status.success(), "reset failed: {}", stderr(&output));
    let output = run_spectron(&["table"], &state);
    assert_eq!(
        stdout(&output),
        "Molecule,Temperature (K),Column Density (cm^-2),Doppler (km/s)\n"
    );
}

#[test]
fn usage_errors_map_to_input_exit_code() {
    let temp = TempDir::new().expect("tempdir should be created");
    let state = temp.path().join("session.json");
    let output = run_spectron(&["explode"], &state);
    assert_eq!(output.status.code(), Some(2));
    assert!(stderr(&output).contains("[INPUT.CLI_USAGE]"));
}
