/// All possible actions/events in the application following The Elm Architecture (TEA)
#[derive(Debug, Clone, PartialEq)]
pub enum Message {
    // ===== Application Control =====
    Quit,
    NoOp,
    /// First message of the event loop: opens the configured bucket or asks for one.
    Start,

    // ===== Navigation =====
    NavigateUp,
    NavigateDown,
    NavigatePageUp,
    NavigatePageDown,
    NavigateHome,
    NavigateEnd,
    ToggleNode,
    ExpandNode,
    CollapseNode,
    SwitchPanel,
    Reload,
    GoBack,

    // ===== UI State Changes =====
    ShowHelp,
    ShowBucketSelect,

    // ===== File Operations =====
    Upload,
    Download,
    Delete,

    // ===== Confirmation =====
    ConfirmLeft,
    ConfirmRight,
    ConfirmToggle,
    ConfirmCommit,
    ConfirmYes,
    ConfirmCancel,

    // ===== Bucket Select =====
    BucketSelectUp,
    BucketSelectDown,
    BucketSelectCommit,
}
