use criterion::{Criterion, criterion_group, criterion_main};
use nobuild::{Cmd, needs_rebuild};
use std::fs;
use std::hint::black_box;

const MOCK_CONFIG: &str = r#"
[log]
level = "warn"
time = false

[build]
compiler = "clang"
flags = ["-O2", "-Wall", "-Wextra"]
src_dir = "examples"
"#;

fn bench_cmd_push(c: &mut Criterion) {
    c.bench_function("cmd_push_64_args", |b| {
        b.iter(|| {
            let mut cmd = Cmd::new();
            for i in 0..64 {
                cmd.arg(format!("-DFLAG_{i}"));
            }
            black_box(cmd.len())
        })
    });
}

fn bench_cmd_infer(c: &mut Criterion) {
    let mut cmd = Cmd::new();
    cmd.push(["cc", "-Wall", "-Wextra", "-O2", "-Iinclude", "-DNDEBUG"]);
    cmd.push(["src/main.c", "-o", "out/main", "-lm"]);

    c.bench_function("cmd_infer", |b| {
        b.iter(|| {
            let target = black_box(&cmd).infer().unwrap();
            black_box(target.output.len() + target.source.len())
        })
    });
}

fn bench_config_parse(c: &mut Criterion) {
    c.bench_function("parse_nobuild_toml", |b| {
        b.iter(|| {
            let _: nobuild::config::NbConfig = toml::from_str(black_box(MOCK_CONFIG)).unwrap();
        })
    });
}

fn bench_needs_rebuild(c: &mut Criterion) {
    let temp_dir = tempfile::tempdir().unwrap();
    let inputs: Vec<_> = (0..32)
        .map(|i| {
            let path = temp_dir.path().join(format!("file_{i}.c"));
            fs::write(&path, "int main() { return 0; }").unwrap();
            path
        })
        .collect();
    let output = temp_dir.path().join("app");
    fs::write(&output, "").unwrap();

    c.bench_function("needs_rebuild_32_inputs", |b| {
        b.iter(|| needs_rebuild(black_box(&output), black_box(&inputs)).unwrap())
    });
}

criterion_group!(
    benches,
    bench_cmd_push,
    bench_cmd_infer,
    bench_config_parse,
    bench_needs_rebuild
);
criterion_main!(benches);
