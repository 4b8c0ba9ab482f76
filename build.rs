use std::env;
use std::fs;
use std::io;
use std::path::Path;

const PLACEHOLDER_HTML: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>Campus Portal</title>
    <style>
        body { font-family: -apple-system, 'Segoe UI', Roboto, sans-serif; max-width: 600px; margin: 100px auto; text-align: center; }
        code { background: #f1f3f4; padding: 2px 6px; border-radius: 4px; }
    </style>
</head>
<body>
    <h1>Campus Portal</h1>
    <p>The web frontend has not been built. The JSON API is served under <code>/api</code>.</p>
    <p><code>cd frontend && bun install && bun run build</code></p>
</body>
</html>"#;

fn main() -> io::Result<()> {
    println!("cargo:rerun-if-changed=frontend/dist");

    let manifest_dir = env::var("CARGO_MANIFEST_DIR").map_err(io::Error::other)?;
    let dist_path = Path::new(&manifest_dir).join("frontend/dist");

    if !dist_path.exists() {
        println!("cargo:warning=frontend/dist not found, embedding a placeholder page");
        // rust-embed 要求目录存在
        fs::create_dir_all(dist_path.join("assets"))?;
        fs::write(dist_path.join("index.html"), PLACEHOLDER_HTML)?;
    }
    Ok(())
}
