//! End-to-end runs of the scrub pipeline over real directory trees

use codescrub::report::REPORT_HEADER;
use codescrub::{Config, Pipeline, ReportFormat, ScrubError};
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

const UPDATE_MARKER: &str =
    "    // Core logic for Update. Involves multiple steps and state changes.";

/// Get the path to the test fixtures directory
fn fixtures_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures")
}

fn project_path() -> PathBuf {
    fixtures_path().join("csharp").join("project")
}

/// Config reading the fixture project and writing into `out`
fn fixture_config(out: &TempDir) -> Config {
    Config {
        input: project_path(),
        output: out.path().join("Code_Cleaned"),
        ..Config::default()
    }
}

fn write_source(root: &Path, rel: &str, content: &str) {
    let path = root.join(rel);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, content).unwrap();
}

/// A method whose closing brace sits `span` lines below its signature
fn method_with_span(name: &str, span: usize) -> String {
    let mut out = format!("    public void {}()\n    {{\n", name);
    for i in 0..span - 2 {
        out.push_str(&format!("        Step({});\n", i));
    }
    out.push_str("    }\n");
    out
}

fn read(path: &Path) -> String {
    fs::read_to_string(path).unwrap()
}

// ============================================================================
// Fixture Project
// ============================================================================

mod fixture_project {
    use super::*;

    #[test]
    fn test_output_mirrors_source_tree() {
        let out = TempDir::new().unwrap();
        let config = fixture_config(&out);

        let summary = Pipeline::new(config.clone()).run().unwrap();

        assert_eq!(summary.files_found, 4);
        assert_eq!(summary.files_written, 4);
        assert_eq!(summary.files_skipped, 0);
        for rel in [
            "AI/Zombie.cs",
            "AI/Villager.cs",
            "AI/ZombieBite.cs",
            "Managers/WaveManager.cs",
        ] {
            assert!(config.output.join(rel).is_file(), "missing {}", rel);
        }
        assert!(!config.output.join("Managers/Notes.txt").exists());
    }

    #[test]
    fn test_unused_report_contents() {
        let out = TempDir::new().unwrap();
        let config = fixture_config(&out);

        let summary = Pipeline::new(config.clone()).run().unwrap();

        assert_eq!(summary.report_path, config.output.join("UNUSED_SCRIPTS_REPORT.txt"));
        let expected = format!(
            "{}\n\nAI/ZombieBite.cs\n  - ZombieBite\n\nManagers/WaveManager.cs\n  - SpawnPoint\n\n",
            REPORT_HEADER
        );
        assert_eq!(read(&summary.report_path), expected);
    }

    #[test]
    fn test_long_method_annotated_once() {
        let out = TempDir::new().unwrap();
        let config = fixture_config(&out);

        let summary = Pipeline::new(config.clone()).run().unwrap();

        assert_eq!(summary.annotated.len(), 1);
        let method = &summary.annotated[0];
        assert_eq!(method.file, "AI/Zombie.cs");
        assert_eq!(method.name, "Update");
        assert_eq!(method.line, 15);
        assert_eq!(method.line_span, 30);

        let cleaned = read(&config.output.join("AI/Zombie.cs"));
        let lines: Vec<&str> = cleaned.lines().collect();
        assert_eq!(lines[14], UPDATE_MARKER);
        assert_eq!(lines[15], "    private void Update()");
        assert_eq!(cleaned.matches("// Core logic for").count(), 1);
    }

    #[test]
    fn test_comments_removed_and_lines_kept() {
        let out = TempDir::new().unwrap();
        let config = fixture_config(&out);

        Pipeline::new(config.clone()).run().unwrap();

        let original = read(&project_path().join("AI/Zombie.cs"));
        let cleaned = read(&config.output.join("AI/Zombie.cs"));

        // One extra line for the marker
        assert_eq!(cleaned.lines().count(), original.lines().count() + 1);
        for gone in ["summary", "units per second", "Pathing", "keep walking", "score"] {
            assert!(!cleaned.contains(gone), "comment text survived: {}", gone);
        }
        assert!(cleaned.contains("    public float speed = 2f;\n"));
        assert!(cleaned.contains("        WaveManager.Instance.ReportKill(this);\n"));
        assert!(cleaned.ends_with("}\n"));

        for rel in ["AI/Villager.cs", "AI/ZombieBite.cs", "Managers/WaveManager.cs"] {
            let original = read(&project_path().join(rel));
            let cleaned = read(&config.output.join(rel));
            assert_eq!(cleaned.lines().count(), original.lines().count(), "{}", rel);
            assert!(!cleaned.contains("//"), "{} still has a comment", rel);
        }
    }

    #[test]
    fn test_parallel_matches_sequential() {
        let out = TempDir::new().unwrap();
        let sequential = fixture_config(&out);
        let parallel = Config {
            output: out.path().join("Parallel"),
            parallel: true,
            ..fixture_config(&out)
        };

        let seq_summary = Pipeline::new(sequential.clone()).run().unwrap();
        let par_summary = Pipeline::new(parallel.clone()).run().unwrap();

        assert_eq!(seq_summary.unused, par_summary.unused);
        assert_eq!(seq_summary.annotated, par_summary.annotated);
        for rel in [
            "AI/Zombie.cs",
            "AI/Villager.cs",
            "AI/ZombieBite.cs",
            "Managers/WaveManager.cs",
            "UNUSED_SCRIPTS_REPORT.txt",
        ] {
            assert_eq!(
                read(&sequential.output.join(rel)),
                read(&parallel.output.join(rel)),
                "{} differs",
                rel
            );
        }
    }

    #[test]
    fn test_json_report() {
        let out = TempDir::new().unwrap();
        let config = Config {
            report: PathBuf::from("unused.json"),
            ..fixture_config(&out)
        };

        let summary = Pipeline::new(config.clone())
            .with_report_format(ReportFormat::Json)
            .run()
            .unwrap();

        assert_eq!(summary.report_path, config.output.join("unused.json"));
        let value: serde_json::Value = serde_json::from_str(&read(&summary.report_path)).unwrap();
        assert_eq!(value["total_files"], 2);
        assert_eq!(value["total_symbols"], 2);
        assert_eq!(value["files"][0]["path"], "AI/ZombieBite.cs");
        assert_eq!(value["files"][0]["symbols"][0], "ZombieBite");
        assert_eq!(value["files"][1]["path"], "Managers/WaveManager.cs");
        assert_eq!(value["files"][1]["symbols"][0], "SpawnPoint");
    }
}

// ============================================================================
// Generated Trees
// ============================================================================

mod generated_trees {
    use super::*;

    fn config_in(dir: &TempDir) -> Config {
        Config {
            input: dir.path().join("Code"),
            output: dir.path().join("Code_Cleaned"),
            ..Config::default()
        }
    }

    #[test]
    fn test_threshold_is_exclusive() {
        let dir = TempDir::new().unwrap();
        let config = config_in(&dir);
        let source = format!(
            "public class Runner\n{{\n{}\n{}}}\n",
            method_with_span("AtLimit", 25),
            method_with_span("OverLimit", 26)
        );
        write_source(&config.input, "Runner.cs", &source);

        let summary = Pipeline::new(config.clone()).run().unwrap();

        let names: Vec<&str> = summary.annotated.iter().map(|m| m.name.as_str()).collect();
        assert_eq!(names, vec!["OverLimit"]);

        let cleaned = read(&config.output.join("Runner.cs"));
        assert!(cleaned.contains(
            "    // Core logic for OverLimit. Involves multiple steps and state changes.\n    public void OverLimit()\n"
        ));
        assert!(!cleaned.contains("Core logic for AtLimit"));
    }

    #[test]
    fn test_custom_threshold() {
        let dir = TempDir::new().unwrap();
        let config = Config {
            line_threshold: 3,
            ..config_in(&dir)
        };
        write_source(&config.input, "Small.cs", &method_with_span("Tiny", 4));

        let summary = Pipeline::new(config).run().unwrap();

        assert_eq!(summary.annotated.len(), 1);
        assert_eq!(summary.annotated[0].name, "Tiny");
    }

    #[test]
    fn test_inline_comment_stripped() {
        let dir = TempDir::new().unwrap();
        let config = config_in(&dir);
        write_source(&config.input, "Set.cs", "int x = 5; // set x\n");

        Pipeline::new(config.clone()).run().unwrap();

        assert_eq!(read(&config.output.join("Set.cs")), "int x = 5;\n");
    }

    #[test]
    fn test_duplicate_definitions_listed_under_each_file() {
        let dir = TempDir::new().unwrap();
        let config = config_in(&dir);
        write_source(&config.input, "A/Foo.cs", "public class Foo {}\n");
        write_source(&config.input, "B/Foo.cs", "public class Foo {}\n");

        let summary = Pipeline::new(config).run().unwrap();

        let files: Vec<&str> = summary.unused.files().map(|(file, _)| file).collect();
        assert_eq!(files, vec!["A/Foo.cs", "B/Foo.cs"]);
        let report = read(&summary.report_path);
        assert!(report.contains("A/Foo.cs\n  - Foo\n\nB/Foo.cs\n  - Foo\n\n"));
    }

    #[test]
    fn test_duplicate_definitions_used_elsewhere() {
        let dir = TempDir::new().unwrap();
        let config = config_in(&dir);
        write_source(&config.input, "A/Foo.cs", "public class Foo {}\n");
        write_source(&config.input, "B/Foo.cs", "public class Foo {}\n");
        write_source(&config.input, "Bar.cs", "public class Bar { Foo foo; }\n");

        let summary = Pipeline::new(config).run().unwrap();

        // Bar itself is only mentioned where it is defined
        let files: Vec<&str> = summary.unused.files().map(|(file, _)| file).collect();
        assert_eq!(files, vec!["Bar.cs"]);
    }

    #[test]
    fn test_stale_output_cleared() {
        let dir = TempDir::new().unwrap();
        let config = config_in(&dir);
        write_source(&config.input, "Player.cs", "public class Player {}\n");
        write_source(&config.output, "Old/Gone.cs", "public class Gone {}\n");

        Pipeline::new(config.clone()).run().unwrap();

        assert!(!config.output.join("Old").exists());
        assert!(config.output.join("Player.cs").is_file());
    }

    #[test]
    fn test_output_inside_input_not_rescanned() {
        let dir = TempDir::new().unwrap();
        let input = dir.path().join("Code");
        let config = Config {
            input: input.clone(),
            output: input.join("Cleaned"),
            ..Config::default()
        };
        write_source(&input, "Player.cs", "public class Player {}\n");

        let first = Pipeline::new(config.clone()).run().unwrap();
        let second = Pipeline::new(config.clone()).run().unwrap();

        assert_eq!(first.files_found, 1);
        assert_eq!(second.files_found, 1);
        assert!(!config.output.join("Cleaned").exists());
    }

    #[test]
    fn test_absolute_report_path() {
        let dir = TempDir::new().unwrap();
        let report = dir.path().join("reports").join("unused.txt");
        let config = Config {
            report: report.clone(),
            ..config_in(&dir)
        };
        write_source(&config.input, "Lonely.cs", "public struct Lonely {}\n");

        let summary = Pipeline::new(config).run().unwrap();

        assert_eq!(summary.report_path, report);
        assert_eq!(
            read(&report),
            format!("{}\n\nLonely.cs\n  - Lonely\n\n", REPORT_HEADER)
        );
    }

    #[test]
    fn test_extension_filter() {
        let dir = TempDir::new().unwrap();
        let config = Config {
            extensions: vec!["txt".to_string()],
            ..config_in(&dir)
        };
        write_source(&config.input, "Skipped.cs", "public class Skipped {}\n");
        write_source(&config.input, "Notes.txt", "class Picked {} // note\n");

        let summary = Pipeline::new(config.clone()).run().unwrap();

        assert_eq!(summary.files_found, 1);
        assert!(!config.output.join("Skipped.cs").exists());
        assert_eq!(read(&config.output.join("Notes.txt")), "class Picked {}\n");
    }

    #[test]
    fn test_input_inside_output_rejected() {
        let dir = TempDir::new().unwrap();
        let config = Config {
            input: dir.path().join("Code_Cleaned").join("Code"),
            output: dir.path().join("Code_Cleaned"),
            ..Config::default()
        };
        write_source(&config.input, "Keep.cs", "public class Keep {}\n");

        let err = Pipeline::new(config.clone()).run().unwrap_err();

        assert!(matches!(err, ScrubError::OverlappingRoots { .. }));
        assert!(config.input.join("Keep.cs").is_file());
    }
}
