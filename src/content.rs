//! Static text for the portfolio tabs.

pub const TITLE: &str = "My Portfolio";
pub const HEADLINE: &str = "Data Science Enthusiast";

pub const ABOUT: &str = "Hi! I'm Satria, a passionate data science enthusiast with experience \
in Python, machine learning, and data visualization.";

pub const ABOUT_POINTS: [&str; 3] = [
    "🔍 I love uncovering insights from data.",
    "🛠 Skilled in pandas, scikit-learn, and Streamlit.",
    "🚀 Always eager to learn and grow!",
];

pub struct Project {
    pub title: &'static str,
    pub summary: &'static str,
}

pub const PROJECTS: [Project; 3] = [
    Project {
        title: "Customer Churn Prediction",
        summary: "Used machine learning to predict customer churn for a telecom company.",
    },
    Project {
        title: "Sales Dashboard",
        summary: "Built an interactive sales dashboard using Streamlit and Plotly.",
    },
    Project {
        title: "Sentiment Analysis",
        summary: "Analyzed social media sentiment using NLP techniques.",
    },
];

pub struct Contact {
    pub label: &'static str,
    pub value: &'static str,
    pub url: Option<&'static str>,
}

pub const CONTACTS: [Contact; 3] = [
    Contact {
        label: "📧 Email",
        value: "satriasaid@xyz.com",
        url: Some("mailto:satriasaid@xyz.com"),
    },
    Contact {
        label: "📱 Phone",
        value: "081234567890",
        url: None,
    },
    Contact {
        label: "💼 LinkedIn",
        value: "linkedin.com/in/satriaxyz",
        url: Some("https://linkedin.com/in/satriaxyz"),
    },
];
