//! Static string table for the two supported interface languages.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::{Priority, TaskStatus};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Language {
    #[default]
    #[serde(rename = "en")]
    English,
    #[serde(rename = "hi")]
    Hindi,
}

impl Language {
    pub const ALL: [Language; 2] = [Language::English, Language::Hindi];

    pub fn code(&self) -> &'static str {
        match self {
            Language::English => "en",
            Language::Hindi => "hi",
        }
    }

    pub fn native_name(&self) -> &'static str {
        match self {
            Language::English => "English",
            Language::Hindi => "हिन्दी",
        }
    }

    /// Unknown codes fall back to English.
    pub fn from_code(code: &str) -> Self {
        Self::parse(code).unwrap_or_default()
    }

    /// Strict lookup, for user input that should be rejected when unknown.
    pub fn parse(code: &str) -> Option<Self> {
        let code = code.trim().to_lowercase();
        let primary = code.split(['-', '_']).next().unwrap_or_default();
        Self::ALL.into_iter().find(|lang| lang.code() == primary)
    }

    pub fn toggle(&self) -> Self {
        match self {
            Language::English => Language::Hindi,
            Language::Hindi => Language::English,
        }
    }

    pub fn t(&self, key: Text) -> &'static str {
        match self {
            Language::English => english(key),
            Language::Hindi => hindi(key),
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Text {
    AppName,
    Productivity,
    Loading,
    LoadingTasks,
    LoggingOut,
    SwitchingLanguage,
    NoAccount,
    HaveAccount,
    FullName,
    DatePlaceholder,
    Created,
    Updated,
    Dashboard,
    Logout,
    AddTask,
    CreateTask,
    Tasks,
    InProgress,
    Todo,
    Completed,
    Delete,
    Edit,
    Save,
    Cancel,
    Close,
    Search,
    AllPriorities,
    High,
    Medium,
    Low,
    Priority,
    AllFieldsRequired,
    Email,
    Password,
    Login,
    Signup,
    Notes,
    Title,
    ReadMore,
    NoTasks,
    Language,
    TaskCreated,
    TaskUpdated,
    TaskDeleted,
    StatusUpdated,
    LoginSuccess,
    SignupSuccess,
    VerificationSent,
    EmailInUse,
    InvalidCredentials,
    SignupFailed,
    ProfileSaveFailed,
}

impl From<TaskStatus> for Text {
    fn from(status: TaskStatus) -> Self {
        match status {
            TaskStatus::Todo => Text::Todo,
            TaskStatus::InProgress => Text::InProgress,
            TaskStatus::Completed => Text::Completed,
        }
    }
}

impl From<Priority> for Text {
    fn from(priority: Priority) -> Self {
        match priority {
            Priority::High => Text::High,
            Priority::Medium => Text::Medium,
            Priority::Low => Text::Low,
        }
    }
}

fn english(key: Text) -> &'static str {
    match key {
        Text::AppName => "Task Manager",
        Text::Productivity => "Productivity",
        Text::Loading => "Loading",
        Text::LoadingTasks => "Loading Tasks",
        Text::LoggingOut => "Logging out",
        Text::SwitchingLanguage => "Switching language",
        Text::NoAccount => "Don't have an Account?",
        Text::HaveAccount => "Already have an Account?",
        Text::FullName => "Full Name",
        Text::DatePlaceholder => "Select Date",
        Text::Created => "Created",
        Text::Updated => "Updated",
        Text::Dashboard => "Dashboard",
        Text::Logout => "Logout",
        Text::AddTask => "Add Task",
        Text::CreateTask => "Create Task",
        Text::Tasks => "Tasks",
        Text::InProgress => "In Progress",
        Text::Todo => "ToDo",
        Text::Completed => "Completed",
        Text::Delete => "Delete",
        Text::Edit => "Edit",
        Text::Save => "Save",
        Text::Cancel => "Cancel",
        Text::Close => "Close",
        Text::Search => "Search...",
        Text::AllPriorities => "All Priorities",
        Text::High => "High",
        Text::Medium => "Medium",
        Text::Low => "Low",
        Text::Priority => "Priority",
        Text::AllFieldsRequired => "All fields are required",
        Text::Email => "Email",
        Text::Password => "Password",
        Text::Login => "Login",
        Text::Signup => "Signup",
        Text::Notes => "Notes",
        Text::Title => "Title",
        Text::ReadMore => "Read More",
        Text::NoTasks => "No Tasks",
        Text::Language => "Language",
        Text::TaskCreated => "Task created",
        Text::TaskUpdated => "Task updated",
        Text::TaskDeleted => "Task deleted",
        Text::StatusUpdated => "Status updated",
        Text::LoginSuccess => "Logged in successfully",
        Text::SignupSuccess => "Signup successful, please log in",
        Text::VerificationSent => "Verification email sent, confirm it before logging in",
        Text::EmailInUse => "This email is already registered",
        Text::InvalidCredentials => "Invalid email or password",
        Text::SignupFailed => "Signup failed",
        Text::ProfileSaveFailed => "Could not save your profile",
    }
}

fn hindi(key: Text) -> &'static str {
    match key {
        Text::AppName => "कार्य प्रबंधक",
        Text::Productivity => "उत्पादकता",
        Text::Loading => "लोड हो रहा है",
        Text::LoadingTasks => "कार्य लोड हो रहा है",
        Text::LoggingOut => "लॉग आउट",
        Text::SwitchingLanguage => "भाषा परिवर्तन",
        Text::NoAccount => "क्या आपके पास खाता नहीं है?",
        Text::HaveAccount => "क्या आपके पास पहले से एक खाता मौजूद है?",
        Text::FullName => "पूरा नाम",
        Text::DatePlaceholder => "तारीख चुनें",
        Text::Created => "निर्माण तिथि",
        Text::Updated => "अद्यतन तिथि",
        Text::Dashboard => "डैशबोर्ड",
        Text::Logout => "लॉगआउट",
        Text::AddTask => "कार्य जोड़ें",
        Text::CreateTask => "कार्य बनाएँ",
        Text::Tasks => "सभी कार्य",
        Text::InProgress => "प्रगति पर",
        Text::Todo => "करना है",
        Text::Completed => "पूर्ण हुआ",
        Text::Delete => "हटाएँ",
        Text::Edit => "संपादित करें",
        Text::Save => "सहेजें",
        Text::Cancel => "रद्द करें",
        Text::Close => "बंद करें",
        Text::Search => "खोजें...",
        Text::AllPriorities => "सभी प्राथमिकताएँ",
        Text::High => "उच्च",
        Text::Medium => "मध्यम",
        Text::Low => "निम्न",
        Text::Priority => "प्राथमिकता",
        Text::AllFieldsRequired => "सभी फ़ील्ड आवश्यक हैं",
        Text::Email => "ईमेल",
        Text::Password => "पासवर्ड",
        Text::Login => "लॉगिन",
        Text::Signup => "साइनअप",
        Text::Notes => "नोट्स",
        Text::Title => "शीर्षक",
        Text::ReadMore => "अधिक पढ़ें",
        Text::NoTasks => "कोई कार्य नहीं",
        Text::Language => "भाषा",
        Text::TaskCreated => "कार्य बनाया गया",
        Text::TaskUpdated => "कार्य अद्यतन किया गया",
        Text::TaskDeleted => "कार्य हटाया गया",
        Text::StatusUpdated => "स्थिति अद्यतन की गई",
        Text::LoginSuccess => "लॉगिन सफल",
        Text::SignupSuccess => "साइनअप सफल, कृपया लॉगिन करें",
        Text::VerificationSent => "सत्यापन ईमेल भेजा गया, लॉगिन से पहले पुष्टि करें",
        Text::EmailInUse => "यह ईमेल पहले से पंजीकृत है",
        Text::InvalidCredentials => "अमान्य ईमेल या पासवर्ड",
        Text::SignupFailed => "साइनअप विफल",
        Text::ProfileSaveFailed => "आपकी प्रोफ़ाइल सहेजी नहीं जा सकी",
    }
}
