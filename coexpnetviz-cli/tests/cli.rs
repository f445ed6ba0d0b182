mod common;

use std::fs;

use crate::common::{
    CliTester, assert_same_file, bundled_style, fixture_tester, get_data_file, stderr, stdout,
};

const NETWORK_FILES: [&str; 4] = [
    "network.node.attr",
    "network.edge.attr",
    "network.sif",
    "coexpnetviz_style.xml",
];

#[test]
fn writes_network_to_current_dir_by_default() {
    let tester = fixture_tester().args(&["-b", "baits.txt", "-e", "leaf.txt"]);
    let output = tester.run().success();
    assert!(stderr(&output).contains("Analysis complete!"));

    for file in NETWORK_FILES {
        assert!(tester.path(file).exists(), "missing {file}");
    }
    assert!(tester.path("leaf.txt.correlation_matrix").exists());
    assert_same_file(&tester.path("coexpnetviz_style.xml"), &bundled_style());
}

#[test]
fn creates_missing_output_dir() {
    let tester = fixture_tester().args(&["-b", "baits.txt", "-e", "leaf.txt", "-o", "a/b/c"]);
    tester.run().success();
    assert!(tester.path("a/b/c/network.sif").exists());
}

#[test]
fn network_name_option() {
    let tester = fixture_tester().args(&[
        "-b",
        "baits.txt",
        "-e",
        "leaf.txt",
        "--name",
        "drought",
        "--no-correlation-matrices",
    ]);
    tester.run().success();

    assert!(tester.path("drought.sif").exists());
    assert!(tester.path("drought.node.attr").exists());
    assert!(!tester.path("network.sif").exists());
    assert!(!tester.path("leaf.txt.correlation_matrix").exists());
}

#[test]
fn job_file_matches_options() {
    let options = fixture_tester().args(&[
        "-b",
        "baits.txt",
        "-e",
        "leaf.txt",
        "-f",
        "families.txt",
        "-o",
        "out",
    ]);
    options.run().success();

    let job = fixture_tester()
        .copy_data("job.json")
        .args(&["-j", "job.json", "-o", "out"]);
    job.run().success();

    for extension in ["node.attr", "edge.attr", "sif"] {
        assert_same_file(
            &job.path(&format!("out/job_network.{extension}")),
            &options.path(&format!("out/network.{extension}")),
        );
    }
    assert_same_file(
        &job.path("out/leaf.txt.correlation_matrix"),
        &options.path("out/leaf.txt.correlation_matrix"),
    );
}

#[test]
fn name_option_overrides_job_file() {
    let tester = fixture_tester()
        .copy_data("job.json")
        .args(&["-j", "job.json", "-n", "override"]);
    tester.run().success();

    assert!(tester.path("override.sif").exists());
    assert!(!tester.path("job_network.sif").exists());
}

#[test]
fn thresholds_select_correlating_genes() {
    let tester = fixture_tester().args(&[
        "-b",
        "baits.txt",
        "-e",
        "leaf.txt",
        "--positive-threshold",
        "0.5",
        "--negative-threshold",
        "-0.5",
    ]);
    tester.run().success();
    let lenient = tester.read("network.sif");
    // g3 (r = 0.8 with b1 and b2) now correlates too
    assert!(lenient.lines().count() > 9);

    let tester = fixture_tester().args(&[
        "-b",
        "baits.txt",
        "-e",
        "leaf.txt",
        "--positive-threshold",
        "1",
        "--negative-threshold",
        "-1",
    ]);
    tester.run().success();
    assert_eq!(tester.read("network.sif"), "n1\t\t\nn2\t\t\nn3\t\t\n");
    assert!(!tester.path("network.edge.attr").exists());
}

#[test]
fn quiet_mode_prints_nothing() {
    let tester = fixture_tester().args(&["-q", "-b", "baits.txt", "-e", "leaf.txt"]);
    let output = tester.run().success();
    assert_eq!(stderr(&output), "");
}

#[test]
fn reports_missing_baits() {
    let tester = fixture_tester().args(&["-b", "baits.txt", "-e", "leaf.txt"]);
    fs::write(tester.path("baits.txt"), "b1 nope\n").unwrap();
    let output = tester.run().success();
    assert!(stderr(&output).contains("Baits not found in any expression matrix: nope"));
}

#[test]
fn fails_without_known_baits() {
    let tester = fixture_tester().args(&["-b", "baits.txt", "-e", "leaf.txt"]);
    fs::write(tester.path("baits.txt"), "x1 x2\n").unwrap();
    let output = tester.run().failure();
    assert!(stderr(&output).contains("none of the baits"));
    assert!(!tester.path("network.sif").exists());
}

#[test]
fn fails_on_missing_input() {
    let tester = CliTester::new().args(&["-b", "baits.txt", "-e", "leaf.txt"]);
    let output = tester.run().failure();
    assert!(stderr(&output).contains("IO error"));
}

#[test]
fn fails_on_invalid_threshold() {
    let tester = fixture_tester().args(&[
        "-b",
        "baits.txt",
        "-e",
        "leaf.txt",
        "--positive-threshold",
        "1.5",
    ]);
    let output = tester.run().failure();
    assert!(stderr(&output).contains("positive_threshold"));
}

#[test]
fn fails_on_gene_in_two_matrices() {
    let tester = fixture_tester()
        .args(&["-b", "baits.txt", "-e", "leaf.txt", "-e", "copy.txt"]);
    fs::copy(get_data_file("leaf.txt"), tester.path("copy.txt")).unwrap();
    let output = tester.run().failure();
    assert!(stderr(&output).contains("multiple expression matrices"));
}

#[test]
fn fails_on_matrices_with_same_file_name() {
    let tester = fixture_tester().args(&[
        "-b",
        "baits.txt",
        "-e",
        "a/expr.txt",
        "-e",
        "b/expr.txt",
        "-o",
        "out",
    ]);
    for (dir, source) in [("a", "leaf.txt"), ("b", "root.txt")] {
        fs::create_dir(tester.path(dir)).unwrap();
        fs::copy(get_data_file(source), tester.path(&format!("{dir}/expr.txt"))).unwrap();
    }

    let output = tester.run().failure();
    assert!(stderr(&output).contains("multiple expression matrices named expr.txt"));
    assert!(!tester.path("out").exists());
}

#[test]
fn single_thread_matches_default() {
    let default = fixture_tester().args(&["-b", "baits.txt", "-e", "leaf.txt"]);
    default.run().success();

    let single = fixture_tester().args(&["-t", "1", "-b", "baits.txt", "-e", "leaf.txt"]);
    let output = single.run().success();
    assert!(stderr(&output).contains("Analysis complete!"));

    for file in ["network.node.attr", "network.sif", "leaf.txt.correlation_matrix"] {
        assert_same_file(&single.path(file), &default.path(file));
    }
}

#[test]
fn fails_on_network_name_with_path() {
    for name in ["../escaped", "sub/net"] {
        let tester = fixture_tester().args(&["-b", "baits.txt", "-e", "leaf.txt", "-n", name]);
        let output = tester.run().failure();
        assert!(stderr(&output).contains("plain file name"), "accepted {name}");
    }
}

#[test]
fn rejects_job_with_input_options() {
    CliTester::new()
        .args(&["-j", "job.json", "-b", "baits.txt"])
        .run()
        .failure();
}

#[test]
fn requires_inputs() {
    CliTester::new().run().failure();
}

#[test]
fn prints_version() {
    let output = CliTester::new().arg("--version").run().success();
    assert!(stdout(&output).contains(env!("CARGO_PKG_VERSION")));
}
