//! Practice set content, in display order

use super::{PracticeSet, Question};

pub static PRACTICE_SETS: &[PracticeSet] = &[
    PracticeSet {
        id: "error-handling",
        title: "Error Handling",
        description: "Master try-catch, promises, and debugging techniques",
        icon: "bug_report",
        color: "#ef4444",
        questions: ERROR_HANDLING,
    },
    PracticeSet {
        id: "debugging",
        title: "Debugging",
        description: "Master browser DevTools and debugging methods",
        icon: "search",
        color: "#3b82f6",
        questions: DEBUGGING,
    },
    PracticeSet {
        id: "api-integration",
        title: "API Integration",
        description: "Learn REST APIs, fetch, and authentication",
        icon: "api",
        color: "#10b981",
        questions: API_INTEGRATION,
    },
];

static ERROR_HANDLING: &[Question] = &[
    Question {
        id: 1,
        prompt: "What will be the output of this code?",
        code: Some(
            r#"try {
    throw new Error('Something went wrong');
} catch (error) {
    console.log('Caught:', error.message);
}
console.log('After try-catch');"#,
        ),
        options: &[
            "Caught: Something went wrong\nAfter try-catch",
            "Error: Something went wrong",
            "Nothing will be printed",
            "Uncaught Error: Something went wrong",
        ],
        correct: 0,
        explanation: "The error is caught and handled, then execution continues after the \
                      try-catch block.",
    },
    Question {
        id: 2,
        prompt: "Which of these correctly handles a Promise rejection?",
        code: Some(
            r#"fetch('/api/data')
    .then(response => response.json())"#,
        ),
        options: &[
            ".then(data => console.log(data), error => console.error(error))",
            ".catch(error => console.error(error))",
            "Both A and B",
            "None of the above",
        ],
        correct: 2,
        explanation: "Both .then() with two arguments and .catch() can handle Promise rejections.",
    },
];

static DEBUGGING: &[Question] = &[Question {
    id: 1,
    prompt: "What does console.trace() do?",
    code: Some(
        r#"function a() { b(); }
function b() { c(); }
function c() { console.trace(); }
a();"#,
    ),
    options: &[
        "Shows the call stack at the point where it's called",
        "Measures execution time",
        "Groups console messages",
        "Clears the console",
    ],
    correct: 0,
    explanation: "console.trace() outputs a full stack trace to the console, showing how you \
                  got to that function.",
}];

static API_INTEGRATION: &[Question] = &[Question {
    id: 1,
    prompt: "What's missing in this fetch request?",
    code: Some(
        r#"fetch('/api/login', {
    method: 'POST',
    body: JSON.stringify({ user: 'test' })
});"#,
    ),
    options: &[
        "Content-Type header",
        "Error handling",
        "Both A and B",
        "Nothing is missing",
    ],
    correct: 2,
    explanation: "Always set Content-Type: application/json for JSON payloads and handle \
                  potential errors.",
}];
