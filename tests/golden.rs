//! Golden tests for make-vfs
//!
//! These tests run the binary over a checked-in fixture tree and compare the
//! generated module text byte for byte, so any change to the emitted shape
//! shows up here first.

use assert_cmd::Command;
use std::path::PathBuf;

/// Get the path to the fixtures directory
pub fn fixtures_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
}

/// Get the path to the sample asset tree
fn sample_assets() -> PathBuf {
    fixtures_dir().join("sample_assets")
}

/// Create a command for running the make-vfs binary
fn make_vfs_cmd() -> Command {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("make-vfs"));
    cmd.env_remove("MAKE_VFS_DIR")
        .env_remove("MAKE_VFS_CONTENT_FORMAT");
    cmd
}

fn run_stdout(cmd: &mut Command) -> String {
    let output = cmd.assert().success().get_output().stdout.clone();
    String::from_utf8(output).expect("module is utf-8")
}

#[cfg(test)]
mod tests {
    use super::*;

    // ==================== Inline Formats ====================

    #[test]
    fn golden_buffer_all_files() {
        let stdout = run_stdout(make_vfs_cmd().arg(sample_assets()).args([
            "--extensions",
            "md,sql,example",
        ]));

        assert_eq!(
            stdout,
            "export default {\n\
             \x20 \".env.example\": Buffer.from(\"UE9SVD0zMDAwCg==\", \"base64\"),\n\
             \x20 \"README.md\": Buffer.from(\"IyBTYW1wbGUgYXNzZXRzCg==\", \"base64\"),\n\
             \x20 \"migrations/001_init.sql\": Buffer.from(\"Q1JFQVRFIFRBQkxFIHVzZXJzIChpZCBJTlRFR0VSKTsK\", \"base64\")\n\
             }\n"
        );
    }

    #[test]
    fn golden_string_routes() {
        let stdout = run_stdout(make_vfs_cmd().arg(sample_assets().join("routes")).args([
            "--content-format",
            "string",
        ]));

        assert_eq!(
            stdout,
            "export default {\n\
             \x20 \"index.ts\": decodeURIComponent(\"export default () => %22home%22%3B%0A\"),\n\
             \x20 \"users/[id].ts\": decodeURIComponent(\"export default (id: string) => id%3B%0A\")\n\
             }\n"
        );
    }

    // ==================== Path List ====================

    #[test]
    fn golden_pathlist_includes_dotfiles() {
        let stdout = run_stdout(make_vfs_cmd().arg(sample_assets()).args([
            "--content-format",
            "export-pathlist",
        ]));

        assert_eq!(
            stdout,
            "export default [\n\
             \x20 \".env.example\",\n\
             \x20 \"README.md\",\n\
             \x20 \"migrations/001_init.sql\",\n\
             \x20 \"routes/index.ts\",\n\
             \x20 \"routes/users/[id].ts\"\n\
             ]\n"
        );
    }

    // ==================== Reference Formats ====================

    #[test]
    fn golden_import_star_without_ext() {
        let stdout = run_stdout(
            make_vfs_cmd()
                .arg(sample_assets().join("routes"))
                .arg(fixtures_dir().join("routes.generated.ts"))
                .args(["--content-format", "import-star", "--no-import-ext", "--stdout"]),
        );

        assert_eq!(
            stdout,
            "import * as _index from \"./sample_assets/routes/index\"\n\
             import * as _users__id_ from \"./sample_assets/routes/users/[id]\"\n\
             \n\
             export default {\n\
             \x20 \"index\": _index,\n\
             \x20 \"users/[id]\": _users__id_\n\
             }\n"
        );
    }

    #[test]
    fn golden_file_reference_keeps_ext() {
        let stdout = run_stdout(
            make_vfs_cmd()
                .arg(sample_assets().join("routes"))
                .arg(fixtures_dir().join("routes.generated.ts"))
                .args(["--content-format", "file-reference", "--no-import-ext", "--stdout"]),
        );

        assert_eq!(
            stdout,
            "import _index_ts from \"./sample_assets/routes/index.ts\" with { type: \"file\" };\n\
             import _users__id__ts from \"./sample_assets/routes/users/[id].ts\" with { type: \"file\" };\n\
             \n\
             import { file } from \"bun\";\n\
             \n\
             export default {\n\
             \x20 \"index.ts\": file(_index_ts),\n\
             \x20 \"users/[id].ts\": file(_users__id__ts)\n\
             }\n"
        );
    }

    #[test]
    fn golden_output_is_stable_across_runs() {
        let run = || {
            run_stdout(make_vfs_cmd().arg(sample_assets()).args([
                "--content-format",
                "string",
            ]))
        };
        assert_eq!(run(), run());
    }
}
