// tests/api_tests.rs

use std::{collections::HashSet, sync::Arc};

use serde_json::{Value, json};
use tutor::{
    commands::{channel, quiz::QuizServiceCommandHandlers},
    config::Config,
    db, routes,
    services::quiz::SqlQuizService,
    state::AppState,
};

/// Helper function to spawn the app on a random port for testing.
/// Returns the base URL (e.g., "http://127.0.0.1:12345").
async fn spawn_app() -> String {
    // 1. Create an in-memory database and run migrations
    let pool = db::connect("sqlite::memory:")
        .await
        .expect("Failed to open in-memory database");
    db::migrate(&pool).await.expect("Failed to migrate database");

    // 2. Create test configuration, command consumer and state
    let config = Config {
        database_url: "sqlite::memory:".to_string(),
        rust_log: "error".to_string(),
        port: 0,
        command_channel_capacity: 8,
    };
    let handlers = QuizServiceCommandHandlers::new(Arc::new(SqlQuizService::new(pool.clone())));
    let (commands, _consumer) =
        channel::spawn_consumer(handlers, config.command_channel_capacity);

    let state = AppState {
        pool,
        config,
        commands,
    };

    // 3. Create the router with the app state
    let app = routes::create_router(state);

    // 4. Bind to port 0 to get a random available port
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind random port");

    let port = listener.local_addr().unwrap().port();
    let address = format!("http://127.0.0.1:{}", port);

    // 5. Spawn the server in the background
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    address
}

async fn post_json(client: &reqwest::Client, url: &str, body: Value) -> reqwest::Response {
    client
        .post(url)
        .json(&body)
        .send()
        .await
        .expect("Failed to execute request")
}

async fn create_course(client: &reqwest::Client, address: &str) -> i64 {
    let name = format!("Course {}", &uuid::Uuid::new_v4().to_string()[..8]);
    let resp = post_json(
        client,
        &format!("{}/api/courses", address),
        json!({ "name": name, "course_type": "TECNICO" }),
    )
    .await;
    assert_eq!(resp.status().as_u16(), 201);
    resp.json::<Value>().await.unwrap()["id"].as_i64().unwrap()
}

async fn create_execution(client: &reqwest::Client, address: &str, course_id: i64) -> i64 {
    let resp = post_json(
        client,
        &format!("{}/api/courses/{}/executions", address, course_id),
        json!({ "acronym": "SE", "academic_term": "1 Semestre 2023/2024" }),
    )
    .await;
    assert_eq!(resp.status().as_u16(), 201);
    resp.json::<Value>().await.unwrap()["id"].as_i64().unwrap()
}

/// Creates a multiple choice question whose correct option is 1.
async fn create_question(client: &reqwest::Client, address: &str, course_id: i64, title: &str) -> i64 {
    let resp = post_json(
        client,
        &format!("{}/api/courses/{}/questions", address, course_id),
        json!({
            "title": title,
            "content": "<p>Pick the <b>first</b> option</p>",
            "correct_answer": { "type": "multiple_choice", "correct_option_id": 1 }
        }),
    )
    .await;
    assert_eq!(resp.status().as_u16(), 201);
    resp.json::<Value>().await.unwrap()["id"].as_i64().unwrap()
}

async fn create_student(client: &reqwest::Client, address: &str) -> i64 {
    let username = format!("s_{}", &uuid::Uuid::new_v4().to_string()[..8]);
    let resp = post_json(
        client,
        &format!("{}/api/students", address),
        json!({ "name": "Ana", "username": username }),
    )
    .await;
    assert_eq!(resp.status().as_u16(), 201);
    resp.json::<Value>().await.unwrap()["id"].as_i64().unwrap()
}

async fn enroll(client: &reqwest::Client, address: &str, execution_id: i64, student_id: i64) {
    let resp = post_json(
        client,
        &format!("{}/api/executions/{}/students", address, execution_id),
        json!({ "student_id": student_id }),
    )
    .await;
    assert_eq!(resp.status().as_u16(), 201);
}

/// Builds a one-question TEST quiz and returns (quiz id, quiz question id).
async fn create_single_question_quiz(
    client: &reqwest::Client,
    address: &str,
    execution_id: i64,
    question_id: i64,
) -> (i64, i64) {
    let quiz: Value = post_json(
        client,
        &format!("{}/api/executions/{}/quizzes", address, execution_id),
        json!({ "title": "Test", "quiz_type": "TEST", "question_ids": [question_id] }),
    )
    .await
    .json()
    .await
    .unwrap();
    (
        quiz["id"].as_i64().unwrap(),
        quiz["questions"][0]["id"].as_i64().unwrap(),
    )
}

#[tokio::test]
async fn health_check_404() {
    let address = spawn_app().await;
    let client = reqwest::Client::new();

    let response = client
        .get(&format!("{}/random_path_that_does_not_exist", address))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status().as_u16(), 404);
}

#[tokio::test]
async fn create_course_fails_validation() {
    let address = spawn_app().await;
    let client = reqwest::Client::new();

    let response = post_json(
        &client,
        &format!("{}/api/courses", address),
        json!({ "name": "   ", "course_type": "TECNICO" }),
    )
    .await;

    assert_eq!(response.status().as_u16(), 400);
}

#[tokio::test]
async fn duplicate_execution_conflicts() {
    let address = spawn_app().await;
    let client = reqwest::Client::new();
    let course_id = create_course(&client, &address).await;
    create_execution(&client, &address, course_id).await;

    let response = post_json(
        &client,
        &format!("{}/api/courses/{}/executions", address, course_id),
        json!({ "acronym": "SE", "academic_term": "1 Semestre 2023/2024" }),
    )
    .await;

    assert_eq!(response.status().as_u16(), 409);
}

#[tokio::test]
async fn generate_quiz_flow() {
    // Arrange
    let address = spawn_app().await;
    let client = reqwest::Client::new();
    let course_id = create_course(&client, &address).await;
    let execution_id = create_execution(&client, &address, course_id).await;

    let mut question_ids = HashSet::new();
    for i in 0..5 {
        question_ids.insert(create_question(&client, &address, course_id, &format!("Q{}", i)).await);
    }

    // Act
    let response = post_json(
        &client,
        &format!("{}/api/executions/{}/quizzes/generate", address, execution_id),
        json!({ "title": "Weekly quiz", "quiz_size": 3 }),
    )
    .await;

    // Assert
    assert_eq!(response.status().as_u16(), 201);
    let quiz: Value = response.json().await.unwrap();
    assert_eq!(quiz["quiz_type"], "GENERATED");
    assert!(quiz["generation_date"].is_string());

    let questions = quiz["questions"].as_array().unwrap();
    assert_eq!(questions.len(), 3);
    let sequences: Vec<i64> = questions.iter().map(|q| q["sequence"].as_i64().unwrap()).collect();
    assert_eq!(sequences, vec![1, 2, 3]);
    let picked: HashSet<i64> = questions
        .iter()
        .map(|q| q["question_id"].as_i64().unwrap())
        .collect();
    assert_eq!(picked.len(), 3);
    assert!(picked.is_subset(&question_ids));

    // The quiz is listed under its execution
    let listed: Vec<Value> = client
        .get(&format!("{}/api/executions/{}/quizzes", address, execution_id))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(listed.len(), 1);
}

#[tokio::test]
async fn generate_quiz_larger_than_pool_is_rejected() {
    let address = spawn_app().await;
    let client = reqwest::Client::new();
    let course_id = create_course(&client, &address).await;
    let execution_id = create_execution(&client, &address, course_id).await;
    create_question(&client, &address, course_id, "Only one").await;

    let response = post_json(
        &client,
        &format!("{}/api/executions/{}/quizzes/generate", address, execution_id),
        json!({ "title": "Too big", "quiz_size": 2 }),
    )
    .await;
    assert_eq!(response.status().as_u16(), 400);

    let listed: Vec<Value> = client
        .get(&format!("{}/api/executions/{}/quizzes", address, execution_id))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert!(listed.is_empty());
}

#[tokio::test]
async fn disabled_questions_are_not_drawn() {
    let address = spawn_app().await;
    let client = reqwest::Client::new();
    let course_id = create_course(&client, &address).await;
    let execution_id = create_execution(&client, &address, course_id).await;
    create_question(&client, &address, course_id, "Active").await;
    let disabled = create_question(&client, &address, course_id, "Disabled").await;

    let response = client
        .put(&format!("{}/api/questions/{}/status", address, disabled))
        .json(&json!({ "status": "DISABLED" }))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status().as_u16(), 200);

    let response = post_json(
        &client,
        &format!("{}/api/executions/{}/quizzes/generate", address, execution_id),
        json!({ "title": "Both", "quiz_size": 2 }),
    )
    .await;
    assert_eq!(response.status().as_u16(), 400);
}

#[tokio::test]
async fn submit_answers_scores_and_blocks_quiz_removal() {
    // Arrange
    let address = spawn_app().await;
    let client = reqwest::Client::new();
    let course_id = create_course(&client, &address).await;
    let execution_id = create_execution(&client, &address, course_id).await;
    let q1 = create_question(&client, &address, course_id, "Q1").await;
    let q2 = create_question(&client, &address, course_id, "Q2").await;
    let q3 = create_question(&client, &address, course_id, "Q3").await;
    let student_id = create_student(&client, &address).await;
    enroll(&client, &address, execution_id, student_id).await;

    let quiz: Value = post_json(
        &client,
        &format!("{}/api/executions/{}/quizzes", address, execution_id),
        json!({ "title": "Exam", "quiz_type": "EXAM", "question_ids": [q1, q2, q3] }),
    )
    .await
    .json()
    .await
    .unwrap();
    let quiz_id = quiz["id"].as_i64().unwrap();
    let slots: Vec<i64> = quiz["questions"]
        .as_array()
        .unwrap()
        .iter()
        .map(|q| q["id"].as_i64().unwrap())
        .collect();

    // Act: one right, one wrong, one left empty
    let response = post_json(
        &client,
        &format!("{}/api/quizzes/{}/answers", address, quiz_id),
        json!({
            "student_id": student_id,
            "answers": [
                { "quiz_question_id": slots[0], "time_taken": 10, "answer_details": { "type": "multiple_choice", "option_id": 1 } },
                { "quiz_question_id": slots[1], "time_taken": 12, "answer_details": { "type": "multiple_choice", "option_id": 2 } },
                { "quiz_question_id": slots[2], "answer_details": { "type": "multiple_choice" } }
            ]
        }),
    )
    .await;

    // Assert
    assert_eq!(response.status().as_u16(), 201);
    let result: Value = response.json().await.unwrap();
    assert_eq!(result["correct_count"], 1);
    assert_eq!(result["total"], 3);
    assert_eq!(result["results"][2]["empty"], true);

    let answers: Vec<Value> = client
        .get(&format!("{}/api/quizzes/{}/answers", address, quiz_id))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(answers.len(), 3);

    let response = client
        .delete(&format!("{}/api/quizzes/{}", address, quiz_id))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status().as_u16(), 409);
}

#[tokio::test]
async fn answer_without_details_is_rejected() {
    let address = spawn_app().await;
    let client = reqwest::Client::new();
    let course_id = create_course(&client, &address).await;
    let execution_id = create_execution(&client, &address, course_id).await;
    let question_id = create_question(&client, &address, course_id, "Q").await;
    let student_id = create_student(&client, &address).await;
    enroll(&client, &address, execution_id, student_id).await;
    let (quiz_id, slot) = create_single_question_quiz(&client, &address, execution_id, question_id).await;

    let response = post_json(
        &client,
        &format!("{}/api/quizzes/{}/answers", address, quiz_id),
        json!({ "student_id": student_id, "answers": [{ "quiz_question_id": slot }] }),
    )
    .await;

    assert_eq!(response.status().as_u16(), 400);
}

#[tokio::test]
async fn quiz_question_is_scored_once_per_student() {
    // Arrange
    let address = spawn_app().await;
    let client = reqwest::Client::new();
    let course_id = create_course(&client, &address).await;
    let execution_id = create_execution(&client, &address, course_id).await;
    let question_id = create_question(&client, &address, course_id, "Q").await;
    let student_id = create_student(&client, &address).await;
    enroll(&client, &address, execution_id, student_id).await;
    let (quiz_id, slot) = create_single_question_quiz(&client, &address, execution_id, question_id).await;
    let answers_url = format!("{}/api/quizzes/{}/answers", address, quiz_id);
    let right = json!({
        "quiz_question_id": slot,
        "answer_details": { "type": "multiple_choice", "option_id": 1 }
    });

    // The same quiz question twice in one submission
    let response = post_json(
        &client,
        &answers_url,
        json!({ "student_id": student_id, "answers": [right.clone(), right.clone(), right.clone()] }),
    )
    .await;
    assert_eq!(response.status().as_u16(), 400);

    // A single answer goes through
    let response = post_json(
        &client,
        &answers_url,
        json!({ "student_id": student_id, "answers": [right.clone()] }),
    )
    .await;
    assert_eq!(response.status().as_u16(), 201);
    let result: Value = response.json().await.unwrap();
    assert_eq!(result["correct_count"], 1);
    assert_eq!(result["total"], 1);

    // Answering it again is refused
    let response = post_json(
        &client,
        &answers_url,
        json!({ "student_id": student_id, "answers": [right] }),
    )
    .await;
    assert_eq!(response.status().as_u16(), 409);

    let answers: Vec<Value> = client
        .get(&answers_url)
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(answers.len(), 1);
}

#[tokio::test]
async fn students_outside_the_execution_cannot_answer() {
    let address = spawn_app().await;
    let client = reqwest::Client::new();
    let course_id = create_course(&client, &address).await;
    let execution_id = create_execution(&client, &address, course_id).await;
    let question_id = create_question(&client, &address, course_id, "Q").await;
    let student_id = create_student(&client, &address).await;
    let (quiz_id, slot) = create_single_question_quiz(&client, &address, execution_id, question_id).await;

    let response = post_json(
        &client,
        &format!("{}/api/quizzes/{}/answers", address, quiz_id),
        json!({
            "student_id": student_id,
            "answers": [{ "quiz_question_id": slot, "answer_details": { "type": "multiple_choice", "option_id": 1 } }]
        }),
    )
    .await;

    assert_eq!(response.status().as_u16(), 403);
}

#[tokio::test]
async fn update_quiz_rejects_mismatched_id() {
    let address = spawn_app().await;
    let client = reqwest::Client::new();
    let course_id = create_course(&client, &address).await;
    let execution_id = create_execution(&client, &address, course_id).await;
    let question_id = create_question(&client, &address, course_id, "Q").await;
    let (quiz_id, _) = create_single_question_quiz(&client, &address, execution_id, question_id).await;

    let response = client
        .put(&format!("{}/api/quizzes/{}", address, quiz_id))
        .json(&json!({ "id": quiz_id + 1, "title": "Renamed" }))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status().as_u16(), 400);

    let response = client
        .put(&format!("{}/api/quizzes/{}", address, quiz_id))
        .json(&json!({ "id": quiz_id, "title": "Renamed" }))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status().as_u16(), 200);
    let quiz: Value = response.json().await.unwrap();
    assert_eq!(quiz["title"], "Renamed");
}

#[tokio::test]
async fn external_execution_opens_for_enrollment_once_activated() {
    // Arrange
    let address = spawn_app().await;
    let client = reqwest::Client::new();
    let course_id = create_course(&client, &address).await;
    let student_id = create_student(&client, &address).await;

    // Act
    let response = post_json(
        &client,
        &format!("{}/api/executions/external", address),
        json!({ "course_id": course_id, "acronym": "DEMO", "academic_term": "2024/2025" }),
    )
    .await;

    // Assert
    assert_eq!(response.status().as_u16(), 201);
    let execution: Value = response.json().await.unwrap();
    assert_eq!(execution["course_type"], "EXTERNAL");
    assert_eq!(execution["status"], "INACTIVE");
    let execution_id = execution["id"].as_i64().unwrap();
    let students_url = format!("{}/api/executions/{}/students", address, execution_id);

    let response = post_json(&client, &students_url, json!({ "student_id": student_id })).await;
    assert_eq!(response.status().as_u16(), 409);

    let activated: Value = post_json(
        &client,
        &format!("{}/api/executions/{}/activate", address, execution_id),
        json!({}),
    )
    .await
    .json()
    .await
    .unwrap();
    assert_eq!(activated["status"], "ACTIVE");

    let response = post_json(&client, &students_url, json!({ "student_id": student_id })).await;
    assert_eq!(response.status().as_u16(), 201);

    let deactivated: Value = post_json(
        &client,
        &format!("{}/api/executions/{}/deactivate", address, execution_id),
        json!({}),
    )
    .await
    .json()
    .await
    .unwrap();
    assert_eq!(deactivated["status"], "INACTIVE");
    assert_eq!(deactivated["number_of_students"], 1);

    let response = post_json(
        &client,
        &format!("{}/api/executions/{}/activate", address, execution_id + 100),
        json!({}),
    )
    .await;
    assert_eq!(response.status().as_u16(), 404);
}

#[tokio::test]
async fn generate_quiz_restricted_to_topics() {
    let address = spawn_app().await;
    let client = reqwest::Client::new();
    let course_id = create_course(&client, &address).await;
    let execution_id = create_execution(&client, &address, course_id).await;
    create_question(&client, &address, course_id, "Untagged").await;

    let topic: Value = post_json(
        &client,
        &format!("{}/api/courses/{}/topics", address, course_id),
        json!({ "name": "Graphs" }),
    )
    .await
    .json()
    .await
    .unwrap();
    let topic_id = topic["id"].as_i64().unwrap();

    let tagged: Value = post_json(
        &client,
        &format!("{}/api/courses/{}/questions", address, course_id),
        json!({
            "title": "Tagged",
            "content": "BFS or DFS?",
            "correct_answer": { "type": "multiple_choice", "correct_option_id": 2 },
            "topic_ids": [topic_id]
        }),
    )
    .await
    .json()
    .await
    .unwrap();

    let quiz: Value = post_json(
        &client,
        &format!("{}/api/executions/{}/quizzes/generate", address, execution_id),
        json!({ "title": "Graphs", "quiz_size": 1, "topic_ids": [topic_id] }),
    )
    .await
    .json()
    .await
    .unwrap();
    assert_eq!(quiz["questions"][0]["question_id"], tagged["id"]);

    let response = post_json(
        &client,
        &format!("{}/api/executions/{}/quizzes/generate", address, execution_id),
        json!({ "title": "Graphs", "quiz_size": 2, "topic_ids": [topic_id] }),
    )
    .await;
    assert_eq!(response.status().as_u16(), 400);
}

#[tokio::test]
async fn quiz_commands_update_and_delete() {
    // Arrange
    let address = spawn_app().await;
    let client = reqwest::Client::new();
    let course_id = create_course(&client, &address).await;
    let execution_id = create_execution(&client, &address, course_id).await;
    let question_id = create_question(&client, &address, course_id, "Q").await;

    let quiz: Value = post_json(
        &client,
        &format!("{}/api/executions/{}/quizzes", address, execution_id),
        json!({ "title": "Before", "quiz_type": "TEST", "question_ids": [question_id] }),
    )
    .await
    .json()
    .await
    .unwrap();
    let quiz_id = quiz["id"].as_i64().unwrap();
    let commands_url = format!("{}/api/commands/quiz", address);

    // Update the title through the command channel
    let reply: Value = post_json(
        &client,
        &commands_url,
        json!({ "command_type": "UpdateQuizCommand", "quiz": { "id": quiz_id, "title": "After" } }),
    )
    .await
    .json()
    .await
    .unwrap();
    assert_eq!(reply["outcome"], "SUCCESS");

    let fetched: Value = client
        .get(&format!("{}/api/quizzes/{}", address, quiz_id))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(fetched["title"], "After");
    assert_eq!(fetched["quiz_type"], "TEST");

    // Updating an unknown quiz fails
    let reply: Value = post_json(
        &client,
        &commands_url,
        json!({ "command_type": "UpdateQuizCommand", "quiz": { "id": 9999, "title": "Nope" } }),
    )
    .await
    .json()
    .await
    .unwrap();
    assert_eq!(reply["outcome"], "FAILURE");

    // Delete, then delete again
    let reply: Value = post_json(
        &client,
        &commands_url,
        json!({ "command_type": "DeleteQuizCommand", "quiz_id": quiz_id }),
    )
    .await
    .json()
    .await
    .unwrap();
    assert_eq!(reply["outcome"], "SUCCESS");

    let response = client
        .get(&format!("{}/api/quizzes/{}", address, quiz_id))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status().as_u16(), 404);

    let reply: Value = post_json(
        &client,
        &commands_url,
        json!({ "command_type": "DeleteQuizCommand", "quiz_id": quiz_id }),
    )
    .await
    .json()
    .await
    .unwrap();
    assert_eq!(reply["outcome"], "FAILURE");
}

#[tokio::test]
async fn deleting_course_keeps_questions() {
    // Arrange
    let address = spawn_app().await;
    let client = reqwest::Client::new();
    let course_id = create_course(&client, &address).await;
    let execution_id = create_execution(&client, &address, course_id).await;

    let topic: Value = post_json(
        &client,
        &format!("{}/api/courses/{}/topics", address, course_id),
        json!({ "name": "Testing" }),
    )
    .await
    .json()
    .await
    .unwrap();
    let topic_id = topic["id"].as_i64().unwrap();

    let question: Value = post_json(
        &client,
        &format!("{}/api/courses/{}/questions", address, course_id),
        json!({
            "title": "Order the lines",
            "content": "<pre>fn main() {}</pre>",
            "correct_answer": { "type": "code_order", "correct_order": [{ "slot_id": 1, "order": 1 }] },
            "topic_ids": [topic_id]
        }),
    )
    .await
    .json()
    .await
    .unwrap();
    let question_id = question["id"].as_i64().unwrap();
    assert_eq!(question["question_type"], "code_order");

    let available: Vec<Value> = client
        .get(&format!("{}/api/executions/{}/topics/available", address, execution_id))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(available.len(), 1);

    post_json(
        &client,
        &format!("{}/api/executions/{}/quizzes/generate", address, execution_id),
        json!({ "title": "Generated", "quiz_size": 1 }),
    )
    .await;

    // Act
    let response = client
        .delete(&format!("{}/api/courses/{}", address, course_id))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status().as_u16(), 204);

    // Assert
    let response = client
        .get(&format!("{}/api/executions/{}", address, execution_id))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status().as_u16(), 404);

    let question: Value = client
        .get(&format!("{}/api/questions/{}", address, question_id))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert!(question["course_id"].is_null());
}

#[tokio::test]
async fn enroll_and_anonymize_students() {
    let address = spawn_app().await;
    let client = reqwest::Client::new();
    let course_id = create_course(&client, &address).await;
    let execution_id = create_execution(&client, &address, course_id).await;
    let student_id = create_student(&client, &address).await;
    let students_url = format!("{}/api/executions/{}/students", address, execution_id);

    let response = post_json(&client, &students_url, json!({ "student_id": student_id })).await;
    assert_eq!(response.status().as_u16(), 201);

    let response = post_json(&client, &students_url, json!({ "student_id": student_id })).await;
    assert_eq!(response.status().as_u16(), 409);

    let response = post_json(
        &client,
        &format!("{}/api/executions/{}/anonymize", address, execution_id),
        json!({}),
    )
    .await;
    assert_eq!(response.status().as_u16(), 200);

    let students: Vec<Value> = client
        .get(&students_url)
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(students.len(), 1);
    assert_eq!(students[0]["name"], format!("STUDENT {}", student_id));

    let execution: Value = client
        .get(&format!("{}/api/executions/{}", address, execution_id))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(execution["number_of_students"], 1);
}
