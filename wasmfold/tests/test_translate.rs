//! End-to-end runs against a stand-in `wasm-objdump`
//!
//! The stand-in prints `<stem>.<section>.txt` from the fixtures directory, or
//! a "section not found" diagnostic when there is no such file, like WABT
//! does for an absent section.

#![cfg(unix)]

use std::fs;
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};
use std::process::Command;

use tempfile::TempDir;
use wasmfold::objdump::WasmObjdump;
use wasmfold::{translate, ModuleRegistry, TranslateError};

const FAKE_OBJDUMP: &str = r#"#!/bin/sh
# wasm-objdump -j SECTION -x FILE
section="$2"
stem=$(basename "$4" .wasm)
dump="$(dirname "$4")/$stem.$section.txt"
if [ -f "$dump" ]; then
    cat "$dump"
else
    echo "Section not found: $section" >&2
    exit 1
fi
"#;

struct Workspace {
    dir: TempDir,
}

impl Workspace {
    /// Temp dir holding a fake WABT install, the fixture dumps and empty wasm files
    fn new(modules: &[&str]) -> Self {
        let dir = TempDir::new().unwrap();

        let bin = dir.path().join("wabt").join("bin");
        fs::create_dir_all(&bin).unwrap();
        let objdump = bin.join("wasm-objdump");
        fs::write(&objdump, FAKE_OBJDUMP).unwrap();
        fs::set_permissions(&objdump, fs::Permissions::from_mode(0o755)).unwrap();

        let fixtures = Path::new(env!("CARGO_MANIFEST_DIR")).join("tests").join("fixtures");
        for entry in fs::read_dir(&fixtures).unwrap() {
            let entry = entry.unwrap();
            fs::copy(entry.path(), dir.path().join(entry.file_name())).unwrap();
        }
        for module in modules {
            fs::write(dir.path().join(format!("{module}.wasm")), b"\0asm").unwrap();
        }

        Self { dir }
    }

    /// Replace the stand-in `wasm-objdump` with another script
    fn set_objdump(&self, script: &str) {
        let objdump = self.wabt_home().join("bin").join("wasm-objdump");
        fs::write(&objdump, script).unwrap();
        fs::set_permissions(&objdump, fs::Permissions::from_mode(0o755)).unwrap();
    }

    fn path(&self, name: &str) -> PathBuf {
        self.dir.path().join(name)
    }

    fn wabt_home(&self) -> PathBuf {
        self.path("wabt")
    }

    fn read(&self, name: &str) -> String {
        fs::read_to_string(self.path(name)).unwrap()
    }
}

#[test]
fn test_multi_module_translation() {
    let ws = Workspace::new(&["apple", "banana"]);
    let objdump = WasmObjdump::from_wabt_home(&ws.wabt_home()).unwrap();
    let registry =
        ModuleRegistry::resolve(&[ws.path("apple.wasm"), ws.path("banana.wasm")], None).unwrap();

    let summary = translate(&objdump, &registry, &ws.path("multi.folded")).unwrap();
    assert_eq!(summary.lines, 5);
    assert!(!summary.stack_check_mode);

    assert_eq!(
        ws.read("multi.translated"),
        "iwasm;wasm_runtime_call_wasm;[Wasm] [apple] peel;[Wasm] [apple] slice 12\n\
         iwasm;wasm_runtime_call_wasm;[Wasm] [banana] blend 7\n\
         iwasm;wasm_runtime_call_wasm;[Wasm] [apple] peel;[Wasm] [banana] split;memcpy 3\n\
         iwasm;[Wasm] [apple] func[7] 1\n\
         iwasm;main;__libc_start_main 2\n"
    );
    assert_eq!(
        ws.read("multi.apple.translated"),
        "iwasm;wasm_runtime_call_wasm;[Wasm] [apple] peel;[Wasm] [apple] slice 12\n\
         iwasm;[Wasm] [apple] func[7] 1\n"
    );
    assert_eq!(
        ws.read("multi.banana.translated"),
        "iwasm;wasm_runtime_call_wasm;[Wasm] [banana] blend 7\n\
         iwasm;wasm_runtime_call_wasm;[Wasm] [apple] peel;[Wasm] [banana] split;memcpy 3\n"
    );
}

#[test]
fn test_combined_output_preserves_lines_and_counts() {
    let ws = Workspace::new(&["apple", "banana"]);
    let objdump = WasmObjdump::from_wabt_home(&ws.wabt_home()).unwrap();
    let registry =
        ModuleRegistry::resolve(&[ws.path("apple.wasm"), ws.path("banana.wasm")], None).unwrap();

    translate(&objdump, &registry, &ws.path("multi.folded")).unwrap();

    let input = ws.read("multi.folded");
    let output = ws.read("multi.translated");
    assert_eq!(input.lines().count(), output.lines().count());
    for (inp, out) in input.lines().zip(output.lines()) {
        assert_eq!(inp.rsplit_once(' ').unwrap().1, out.rsplit_once(' ').unwrap().1);
        assert_eq!(inp.split(';').count(), out.split(';').count());
    }
}

#[test]
fn test_rerun_is_byte_identical() {
    let ws = Workspace::new(&["apple", "banana"]);
    let objdump = WasmObjdump::from_wabt_home(&ws.wabt_home()).unwrap();
    let registry =
        ModuleRegistry::resolve(&[ws.path("apple.wasm"), ws.path("banana.wasm")], None).unwrap();

    translate(&objdump, &registry, &ws.path("multi.folded")).unwrap();
    let first = fs::read(ws.path("multi.translated")).unwrap();
    translate(&objdump, &registry, &ws.path("multi.folded")).unwrap();
    let second = fs::read(ws.path("multi.translated")).unwrap();
    assert_eq!(first, second);
}

#[test]
fn test_stack_check_translation_single_module() {
    let ws = Workspace::new(&["apple"]);
    let objdump = WasmObjdump::from_wabt_home(&ws.wabt_home()).unwrap();
    let registry = ModuleRegistry::resolve(&[ws.path("apple.wasm")], None).unwrap();

    let summary = translate(&objdump, &registry, &ws.path("stackcheck.folded")).unwrap();
    assert!(summary.stack_check_mode);

    let expected = "iwasm;[Wasm] peel_precheck;[Wasm] peel 4\n\
                    iwasm;[Wasm] peel_precheck;[Wasm] peel;[Wasm] slice_precheck;[Wasm] slice 9\n";
    assert_eq!(ws.read("stackcheck.translated"), expected);
    assert_eq!(ws.read("stackcheck.apple.translated"), expected);
}

#[test]
fn test_untagged_symbol_with_two_modules_fails_without_output() {
    let ws = Workspace::new(&["apple", "banana"]);
    let objdump = WasmObjdump::from_wabt_home(&ws.wabt_home()).unwrap();
    let registry =
        ModuleRegistry::resolve(&[ws.path("apple.wasm"), ws.path("banana.wasm")], None).unwrap();

    let err = translate(&objdump, &registry, &ws.path("stackcheck.folded")).unwrap_err();
    match err {
        TranslateError::AtLine { line_no, source, .. } => {
            assert_eq!(line_no, 1);
            assert!(matches!(*source, TranslateError::AmbiguousModule { .. }));
        }
        other => panic!("unexpected error: {other}"),
    }
    assert!(!ws.path("stackcheck.translated").exists());
    assert!(!ws.path("stackcheck.apple.translated").exists());
}

#[test]
fn test_cli_writes_outputs() {
    let ws = Workspace::new(&["apple", "banana"]);
    let names = format!(
        "a={},b={}",
        ws.path("apple.wasm").display(),
        ws.path("banana.wasm").display()
    );
    fs::write(ws.path("short.folded"), "x;[a]#aot_func#1;[b]#aot_func#0 3\n").unwrap();

    let output = Command::new(env!("CARGO_BIN_EXE_wasmfold"))
        .arg("--wabt-home")
        .arg(ws.wabt_home())
        .arg("--wasm-names")
        .arg(&names)
        .arg("--quiet")
        .arg(ws.path("short.folded"))
        .output()
        .unwrap();

    assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));
    // Dumps are keyed by file stem: a reads apple's, b reads banana's
    assert_eq!(ws.read("short.translated"), "x;[Wasm] [a] slice;[Wasm] [b] split 3\n");
    assert_eq!(ws.read("short.b.translated"), "x;[Wasm] [a] slice;[Wasm] [b] split 3\n");
    assert_eq!(ws.read("short.a.translated"), "");
}

#[test]
fn test_cli_unknown_module_exits_non_zero() {
    let ws = Workspace::new(&["apple"]);
    fs::write(ws.path("bad.folded"), "x;[cherry]#aot_func#0 3\n").unwrap();

    let output = Command::new(env!("CARGO_BIN_EXE_wasmfold"))
        .arg("--wabt-home")
        .arg(ws.wabt_home())
        .arg("--wasm")
        .arg(ws.path("apple.wasm"))
        .arg(ws.path("bad.folded"))
        .output()
        .unwrap();

    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("cherry"), "{stderr}");
    assert!(!ws.path("bad.translated").exists());
}

#[test]
fn test_cli_missing_objdump() {
    let ws = Workspace::new(&["apple"]);
    let output = Command::new(env!("CARGO_BIN_EXE_wasmfold"))
        .arg("--wabt-home")
        .arg(ws.path("nowhere"))
        .arg("--wasm")
        .arg(ws.path("apple.wasm"))
        .arg(ws.path("multi.folded"))
        .output()
        .unwrap();

    assert_eq!(output.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&output.stderr).contains("wasm-objdump"));
}

#[test]
fn test_silent_objdump_failure_is_an_error() {
    let ws = Workspace::new(&["apple"]);
    ws.set_objdump("#!/bin/sh\nexit 3\n");
    let objdump = WasmObjdump::from_wabt_home(&ws.wabt_home()).unwrap();
    let registry = ModuleRegistry::resolve(&[ws.path("apple.wasm")], None).unwrap();

    let err = translate(&objdump, &registry, &ws.path("multi.folded")).unwrap_err();
    assert!(matches!(err, TranslateError::ExternalToolFailure { .. }), "{err}");
    assert!(err.to_string().contains("apple.wasm"));

    let translated: Vec<_> = fs::read_dir(ws.dir.path())
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
        .filter(|name| name.ends_with(".translated"))
        .collect();
    assert!(translated.is_empty(), "{translated:?}");
}

#[test]
fn test_cli_rejects_module_name_with_separator() {
    let ws = Workspace::new(&["apple"]);
    let names = format!("lib/core={}", ws.path("apple.wasm").display());

    let output = Command::new(env!("CARGO_BIN_EXE_wasmfold"))
        .arg("--wabt-home")
        .arg(ws.wabt_home())
        .arg("--wasm-names")
        .arg(&names)
        .arg(ws.path("multi.folded"))
        .output()
        .unwrap();

    assert_eq!(output.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&output.stderr).contains("lib/core"));
}
