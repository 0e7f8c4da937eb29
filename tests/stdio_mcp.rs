use std::collections::HashSet;
use std::io::{BufRead, BufReader, Write};
use std::process::{Child, ChildStdin, ChildStdout, Command, Stdio};
use tempfile::TempDir;

struct Session {
    child: Child,
    stdin: ChildStdin,
    stdout: BufReader<ChildStdout>,
    _dir: TempDir,
}

impl Session {
    fn start(extra_env: &[(&str, &str)]) -> Result<Self, Box<dyn std::error::Error>> {
        let dir = tempfile::tempdir()?;
        let mut command = Command::new(env!("CARGO_BIN_EXE_notion-tools"));
        command
            .env("HOST", "127.0.0.1")
            .env("NOTION_TOOLS_PORT", "0")
            .env("NOTION_CREDENTIAL_FILE", dir.path().join("credentials.json"))
            .env("NOTION_API_BASE", "http://127.0.0.1:9")
            .env_remove("NOTION_API_KEY")
            .env("RUST_LOG", "off")
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::null());
        for (key, value) in extra_env {
            command.env(key, value);
        }
        let mut child = command.spawn()?;

        let stdin = child.stdin.take().expect("stdin available");
        let stdout = BufReader::new(child.stdout.take().expect("stdout available"));
        Ok(Self {
            child,
            stdin,
            stdout,
            _dir: dir,
        })
    }

    fn request(
        &mut self,
        request: serde_json::Value,
    ) -> Result<serde_json::Value, Box<dyn std::error::Error>> {
        writeln!(self.stdin, "{}", serde_json::to_string(&request)?)?;
        self.stdin.flush()?;

        let mut line = String::new();
        self.stdout.read_line(&mut line)?;
        Ok(serde_json::from_str(line.trim())?)
    }
}

impl Drop for Session {
    fn drop(&mut self) {
        let _ = self.child.kill();
        let _ = self.child.wait();
    }
}

#[test]
fn initialize_round_trip() -> Result<(), Box<dyn std::error::Error>> {
    let mut session = Session::start(&[])?;
    let response = session.request(serde_json::json!({
        "jsonrpc": "2.0",
        "id": 1,
        "method": "initialize",
        "params": {}
    }))?;

    assert_eq!(response.get("id").and_then(|v| v.as_i64()), Some(1));
    let result = response.get("result").expect("result present");
    assert_eq!(
        result.get("protocolVersion").and_then(|v| v.as_str()),
        Some("2024-11-05")
    );
    assert_eq!(
        result["serverInfo"].get("name").and_then(|v| v.as_str()),
        Some("notion-tools")
    );
    Ok(())
}

#[test]
fn tools_list_includes_every_notion_tool() -> Result<(), Box<dyn std::error::Error>> {
    let mut session = Session::start(&[])?;
    let response = session.request(serde_json::json!({
        "jsonrpc": "2.0",
        "id": 2,
        "method": "tools/list",
        "params": {}
    }))?;

    let tools = response
        .get("result")
        .and_then(|value| value.get("tools"))
        .and_then(|value| value.as_array())
        .expect("tools array present");

    let names: HashSet<&str> = tools
        .iter()
        .filter_map(|tool| tool.get("name").and_then(|value| value.as_str()))
        .collect();

    let expected: HashSet<&str> = [
        "blocks.retrieve",
        "blocks.list_children",
        "blocks.append_children",
        "blocks.update",
        "blocks.delete",
        "pages.retrieve",
        "pages.create",
        "pages.update",
        "pages.retrieve_property",
        "databases.retrieve",
        "databases.create",
        "databases.update",
        "databases.query",
        "users.list",
        "users.retrieve",
        "users.me",
        "comments.list",
        "comments.create",
        "search",
    ]
    .into_iter()
    .collect();

    assert_eq!(names, expected);
    Ok(())
}

#[test]
fn tool_call_without_credential_is_an_error_result() -> Result<(), Box<dyn std::error::Error>> {
    let mut session = Session::start(&[])?;
    let response = session.request(serde_json::json!({
        "jsonrpc": "2.0",
        "id": 3,
        "method": "tools/call",
        "params": {"name": "pages.retrieve", "arguments": {"page_id": "abc"}}
    }))?;

    let result = response.get("result").expect("result present");
    assert_eq!(result.get("isError").and_then(|v| v.as_bool()), Some(true));
    let text = result["content"][0]["text"].as_str().expect("text content");
    assert!(text.contains("not configured"));
    Ok(())
}

#[test]
fn env_token_is_used_when_slot_is_empty() -> Result<(), Box<dyn std::error::Error>> {
    // Nothing listens on port 9 here, so a bound credential shows up as a
    // transport failure rather than a missing-credential error.
    let mut session = Session::start(&[("NOTION_API_KEY", "secret_env")])?;
    let response = session.request(serde_json::json!({
        "jsonrpc": "2.0",
        "id": 4,
        "method": "tools/call",
        "params": {"name": "users.me", "arguments": {}}
    }))?;

    let text = response["result"]["content"][0]["text"]
        .as_str()
        .expect("text content");
    assert!(text.contains("Network error"), "{text}");
    Ok(())
}
