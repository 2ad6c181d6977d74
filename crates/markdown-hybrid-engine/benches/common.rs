// Benchmark helper functions - Rust's dead code analysis doesn't understand
// that these are used by benchmark files in the same directory
// See: https://users.rust-lang.org/t/cargo-rustc-benches-awarnings/110111/2
#[allow(dead_code)]
pub fn generate_markdown_content(size: usize) -> String {
    let base = "# Title\n\nParagraph with **some** content.\n\n- [ ] open task\n- [x] done task\n\n```rust\nfn example() {\n    println!(\"Hello\");\n}\n```\n\n| a | b |\n| - | - |\n| 1 | 2 |\n\n$$\n\\frac{a}{b}\n$$\n\n```mermaid\ngraph TD\nA-->B\n```\n\n";
    base.repeat(size)
}

#[allow(dead_code)]
pub fn with_frontmatter(body: &str) -> String {
    format!("---\ntitle: bench\ntags: [a, b]\n---\n{body}")
}
