#[derive(Debug, Clone)]
pub enum Message {
    // === ACTIVITY LOG MESSAGES ===
    UserActiveAgain,
    UserIdle(u64), // idle threshold in seconds
    DocumentHidden,
    DocumentVisible,
    WindowLostFocus,
    WindowGainedFocus,
    LeavingPage,
    UserCopied(String),
    CopyReadDenied,
    KeyPressed(String),
    TextHighlighted(String),

    // === CONFIGURATION MESSAGES ===
    ConfigSaved,
    ConfigDeleted,
    ConfigNotFound,
    ConfigModuleMonitor,
    PromptIdleThreshold,
    InvalidIdleThreshold(u64),

    // === MONITOR MESSAGES ===
    MonitorStarted { idle_threshold: u64 },
    MonitorStopped { entries: usize },
    MonitorShuttingDown,
    MonitorNotRunning,
    MonitorTaskPanicked(String),
    ActiveStatus,
    InactiveStatus,

    // === INPUT SOURCE MESSAGES ===
    InputHookRegistering,
    InputHookFailed(String),
    TerminalSessionStarting,
    TerminalSessionUnavailable(String),
    WatcherReceivedSigterm,
    WatcherReceivedSigint,
    WatcherQuitRequested,
    WatcherSignalHandlingNotSupported,

    // === FEED MESSAGES ===
    FeedFinished(usize),

    // === REPLAY MESSAGES ===
    ReplayHeader(String),
    ReplayEmpty,
}
