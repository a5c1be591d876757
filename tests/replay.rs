#[cfg(test)]
mod tests {
    use std::io::Write;
    use std::sync::OnceLock;
    use tabmon::commands::replay::{run, ReplayArgs};
    use tempfile::{NamedTempFile, TempDir};
    use test_context::{test_context, AsyncTestContext};

    /// One empty home for the whole file; replays only read the configuration.
    fn shared_home() -> &'static TempDir {
        static HOME: OnceLock<TempDir> = OnceLock::new();
        HOME.get_or_init(|| {
            let temp_dir = tempfile::tempdir().unwrap();
            std::env::set_var("HOME", temp_dir.path());
            std::env::set_var("LOCALAPPDATA", temp_dir.path());
            temp_dir
        })
    }

    struct ReplayTestContext {
        feed: NamedTempFile,
    }

    impl ReplayTestContext {
        fn write_feed(&mut self, lines: &[&str]) {
            for line in lines {
                writeln!(self.feed, "{}", line).unwrap();
            }
            self.feed.flush().unwrap();
        }

        fn args(&self) -> ReplayArgs {
            ReplayArgs {
                path: self.feed.path().to_string_lossy().into_owned(),
                clipboard: None,
                idle_threshold: None,
                json: false,
            }
        }
    }

    impl AsyncTestContext for ReplayTestContext {
        async fn setup() -> Self {
            shared_home();
            ReplayTestContext {
                feed: NamedTempFile::new().unwrap(),
            }
        }
    }

    fn messages(state: &tabmon::libs::store::ActivityState) -> Vec<String> {
        state.entries.iter().map(|e| e.text[11..].to_string()).collect()
    }

    #[test_context(ReplayTestContext)]
    #[tokio::test]
    async fn test_replay_empty_feed(ctx: &mut ReplayTestContext) {
        ctx.write_feed(&["# nothing happened", ""]);
        let state = run(&ctx.args()).await.unwrap();
        assert!(state.entries.is_empty());
        assert!(state.tab_active);
    }

    #[test_context(ReplayTestContext)]
    #[tokio::test]
    async fn test_replay_tab_switch_session(ctx: &mut ReplayTestContext) {
        ctx.write_feed(&[
            r#"{"type":"key_down","key":"h"}"#,
            r#"{"type":"visibility","state":"hidden"}"#,
            r#"{"type":"key_down","key":"i"}"#,
            r#"{"type":"visibility","state":"visible"}"#,
            r#"{"type":"pointer_up","selection":"some text"}"#,
            r#"{"type":"before_unload"}"#,
        ]);
        let state = run(&ctx.args()).await.unwrap();

        assert_eq!(
            messages(&state),
            vec![
                "Key pressed: h",
                "Document hidden (tab switch or minimized)",
                "Document visible",
                "User highlighted text: \"some text\"",
                "User is attempting to leave the page",
            ]
        );
        let alerts: Vec<bool> = state.entries.iter().map(|e| e.is_alert).collect();
        assert_eq!(alerts, vec![false, true, false, false, true]);
    }

    #[test_context(ReplayTestContext)]
    #[tokio::test]
    async fn test_replay_copy_granted(ctx: &mut ReplayTestContext) {
        ctx.write_feed(&[r#"{"type":"copy"}"#]);
        let mut args = ctx.args();
        args.clipboard = Some("hello".to_string());

        let state = run(&args).await.unwrap();
        assert_eq!(messages(&state), vec!["User copied: \"hello\""]);
    }

    #[test_context(ReplayTestContext)]
    #[tokio::test]
    async fn test_replay_copy_denied(ctx: &mut ReplayTestContext) {
        ctx.write_feed(&[r#"{"type":"copy"}"#]);
        let state = run(&ctx.args()).await.unwrap();
        assert_eq!(messages(&state), vec!["Copy detected but clipboard read denied"]);
        assert!(state.entries[0].is_alert);
    }

    #[test_context(ReplayTestContext)]
    #[tokio::test(start_paused = true)]
    async fn test_replay_delays_drive_idle(ctx: &mut ReplayTestContext) {
        ctx.write_feed(&[
            r#"{"type":"click","delay_ms":30000}"#,
            r#"{"type":"key_down","key":"x","delay_ms":61000}"#,
        ]);
        let mut args = ctx.args();
        args.idle_threshold = Some(45);

        let state = run(&args).await.unwrap();
        assert_eq!(
            messages(&state),
            vec!["User is idle (no interaction for 45s)", "User is active again", "Key pressed: x"]
        );
        assert!(!state.idle);
    }

    #[test_context(ReplayTestContext)]
    #[tokio::test]
    async fn test_replay_rejects_zero_threshold(ctx: &mut ReplayTestContext) {
        ctx.write_feed(&[r#"{"type":"click"}"#]);
        let mut args = ctx.args();
        args.idle_threshold = Some(0);
        assert!(run(&args).await.is_err());
    }

    #[test_context(ReplayTestContext)]
    #[tokio::test]
    async fn test_replay_invalid_line(ctx: &mut ReplayTestContext) {
        ctx.write_feed(&[r#"{"type":"click"}"#, r#"{"type":"teleport"}"#]);
        let err = run(&ctx.args()).await.unwrap_err();
        assert!(err.to_string().contains("line 2"));
    }

    #[test]
    fn test_replay_missing_feed() {
        shared_home();
        let runtime = tokio::runtime::Runtime::new().unwrap();
        let args = ReplayArgs {
            path: "/nonexistent/feed.jsonl".to_string(),
            clipboard: None,
            idle_threshold: None,
            json: true,
        };
        assert!(runtime.block_on(run(&args)).is_err());
    }
}
