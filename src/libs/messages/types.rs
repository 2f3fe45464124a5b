/// Every user-facing line the CLI prints, grouped by command area.
///
/// The text lives in `display.rs`; call sites only pick the variant and its
/// parameters.
#[derive(Debug, Clone)]
pub enum Message {
    // === CONFIG ===
    ConfigSaved,
    ConfigModuleServer,
    ConfigModuleBoard,
    PromptSelectModules,
    PromptServerApiUrl,
    PromptServerTimeout,
    PromptDefaultProject,

    // === AUTH ===
    PromptName,
    PromptEmail,
    PromptPhone,
    PromptPassword,
    PromptPasswordConfirm,
    PasswordMismatch,
    LoginSuccess(String),
    LoginFailed,
    SignupSuccess(String),
    LoggedOut,
    NotLoggedIn,
    LoggedInAs { name: String, email: String },
    UserRoles(String),
    SessionExpired,
    SessionCorrupted,
    TokenRefreshed,
    NoRefreshToken,
    ApiEndpoint(String),

    // === PROJECTS ===
    ProjectsHeader,
    NoProjects,
    ProjectHeader(String),
    ProjectMembersHeader,
    NoProjectMembers,
    ProjectCreated { name: String, id: String },
    ProjectUpdated(String),
    ProjectDeleted(String),
    ProjectRequired,
    ConfirmDeleteProject(String),
    NothingToUpdate,
    MembersInvited { count: usize, role: String },

    // === BOARD & TASKS ===
    BoardHeader(String),
    BoardEmpty,
    BoardUnmapped(usize),
    TaskCreated { title: String, id: String },
    TaskRemoved(String),
    TaskMoved { id: String, status: String },
    TaskAssigned { id: String, assignee: String },
    TaskUnassigned(String),
    TaskNotFound(String),
    ConfirmDeleteTask(String),
    InvalidDueDate(String),

    // === COMMENTS ===
    CommentsHeader(String),
    NoComments,
    CommentAdded,
    CommentRemoved(String),

    // === GENERAL ===
    OperationCancelled,
    ChangeRolledBack(String),
}
