//! Story episode content
//!
//! Three episodes of three questions each. Must stay sorted by number.

use super::{Episode, Question};

pub static EPISODES: &[Episode] = &[
    Episode {
        number: 1,
        title: "The First Bug",
        questions: EPISODE_1,
    },
    Episode {
        number: 2,
        title: "API Challenges",
        questions: EPISODE_2,
    },
    Episode {
        number: 3,
        title: "Final Debug",
        questions: EPISODE_3,
    },
];

static EPISODE_1: &[Question] = &[
    Question {
        id: 1,
        prompt: "What's the main bug in this authentication function?",
        code: Some(
            r#"function authenticateUser(users) {
    let total = 0;
    for (let i = 0; i < users.length; i++) {
        total += users[i].score;
    }
    return total;
}"#,
        ),
        options: &[
            "The function is not exported",
            "Missing error handling for undefined users",
            "The loop should use forEach instead",
            "Missing return type declaration",
        ],
        correct: 1,
        explanation: "If users is undefined or null, users.length will throw a TypeError. \
                      Professional code should always validate inputs.",
    },
    Question {
        id: 2,
        prompt: "How would you fix this bug?",
        code: Some(
            r#"function authenticateUser(users) {
    // Fix goes here
    let total = 0;
    for (let i = 0; i < users.length; i++) {
        total += users[i].score;
    }
    return total;
}"#,
        ),
        options: &[
            "Add: if (!users) return 0;",
            "Add: users = users || [];",
            "Add: try { ... } catch(e) { return 0; }",
            "All of the above",
        ],
        correct: 3,
        explanation: "All three approaches would prevent the TypeError in different ways, \
                      though input validation is usually cleanest.",
    },
    Question {
        id: 3,
        prompt: "What's the best practice for this scenario?",
        code: Some(
            r#"function processData(data) {
    // Process data here
}"#,
        ),
        options: &[
            "Always validate input parameters",
            "Use TypeScript for type safety",
            "Add comprehensive error handling",
            "All of the above",
        ],
        correct: 3,
        explanation: "Professional code should include all these practices for robustness \
                      and maintainability.",
    },
];

static EPISODE_2: &[Question] = &[
    Question {
        id: 1,
        prompt: "What's missing in the getUserData function?",
        code: Some(
            r#"async function getUserData(id) {
    const response = fetch(`/api/users/${id}`);
    const data = response.json();
    return data;
}"#,
        ),
        options: &[
            "Missing error handling for network failures",
            "Missing await before fetch and response.json()",
            "Missing input validation for the ID parameter",
            "Missing Content-Type header",
        ],
        correct: 1,
        explanation: "Both fetch() and response.json() return Promises that need to be awaited. \
                      Without await, you're working with Promise objects.",
    },
    Question {
        id: 2,
        prompt: "How should this function handle errors?",
        code: Some(
            r#"async function getUserData(id) {
    // Error handling should be added here
}"#,
        ),
        options: &[
            "Wrap everything in try-catch",
            "Check response.ok status",
            "Add timeout handling",
            "All of the above",
        ],
        correct: 3,
        explanation: "Robust API calls should include all these error handling strategies \
                      to ensure a good UX.",
    },
    Question {
        id: 3,
        prompt: "What's the benefit of using async/await?",
        code: Some("// Using async/await vs .then()"),
        options: &[
            "Cleaner, more readable code",
            "Better error handling with try-catch",
            "Easier debugging",
            "All of the above",
        ],
        correct: 3,
        explanation: "Async/await provides all these benefits over traditional Promise chains, \
                      leading to linear flow.",
    },
];

static EPISODE_3: &[Question] = &[
    Question {
        id: 1,
        prompt: "What's wrong with this production code?",
        code: Some(
            r#"function calculateTotal(items) {
    let total = 0;
    items.forEach(item => {
        total += item.price * item.quantity;
    });
    return total.toFixed(2);
}"#,
        ),
        options: &[
            "No validation for items parameter",
            "toFixed() returns a string, not a number",
            "Missing error handling for NaN values",
            "All of the above",
        ],
        correct: 3,
        explanation: "Production code should handle all edge cases and return proper types. \
                      Mixed types can lead to bugs.",
    },
    Question {
        id: 2,
        prompt: "How would you optimize this for performance?",
        code: Some(
            r#"function processLargeArray(arr) {
    return arr
        .filter(x => x > 0)
        .map(x => x * 2)
        .reduce((sum, x) => sum + x, 0);
}"#,
        ),
        options: &[
            "Use a single for loop instead",
            "Implement pagination for large arrays",
            "Use Web Workers for parallel processing",
            "All of the above",
        ],
        correct: 3,
        explanation: "For very large arrays, reducing iteration count or using background \
                      threads is essential.",
    },
    Question {
        id: 3,
        prompt: "What's missing for production readiness?",
        code: Some(
            r#"function criticalFunction(data) {
    // Critical business logic here
    return result;
}"#,
        ),
        options: &[
            "Comprehensive logging",
            "Input validation and sanitization",
            "Unit tests and error boundaries",
            "All of the above",
        ],
        correct: 3,
        explanation: "Production code requires all these elements for reliability, \
                      monitoring, and future maintenance.",
    },
];
