// tests/quiz_tests.rs

use lms_backend::{config::Config, db, routes, state::AppState};
use serde_json::{Value, json};

/// Spawns the app over a fresh in-memory database on a random port.
/// Returns the base URL (e.g., "http://127.0.0.1:12345").
async fn spawn_app() -> String {
    let pool = db::connect_in_memory()
        .await
        .expect("Failed to open in-memory database");

    db::migrate(&pool).await.expect("Failed to migrate database");

    let config = Config {
        database_url: "sqlite::memory:".to_string(),
        port: 0,
        jwt_secret: "quiz_test_secret".to_string(),
        jwt_expiration: 600,
        rust_log: "error".to_string(),
        cors_origins: vec!["http://localhost:3000".to_string()],
        seed_teacher_id: None,
        seed_teacher_password: None,
    };

    let app = routes::create_router(AppState::new(pool, config));

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind random port");
    let port = listener.local_addr().unwrap().port();
    let address = format!("http://127.0.0.1:{}", port);

    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    address
}

async fn post_json(client: &reqwest::Client, url: String, body: Value) -> (u16, Value) {
    let response = client
        .post(url)
        .json(&body)
        .send()
        .await
        .expect("Failed to execute request");
    let status = response.status().as_u16();
    let body = response.json::<Value>().await.unwrap_or(Value::Null);
    (status, body)
}

async fn get_json(client: &reqwest::Client, url: String) -> (u16, Value) {
    let response = client
        .get(url)
        .send()
        .await
        .expect("Failed to execute request");
    let status = response.status().as_u16();
    let body = response.json::<Value>().await.unwrap_or(Value::Null);
    (status, body)
}

/// Teacher, course and module. Returns (course_id, module_id).
async fn seed_course(client: &reqwest::Client, address: &str) -> (i64, i64) {
    let (status, teacher) = post_json(
        client,
        format!("{}/teachers", address),
        json!({
            "unique_id": "teacher001",
            "name": "Ada",
            "email": "ada@example.com",
            "password": "password123"
        }),
    )
    .await;
    assert_eq!(status, 201);

    let (status, course) = post_json(
        client,
        format!("{}/courses", address),
        json!({ "course_name": "Geography", "teacher_id": teacher["id"] }),
    )
    .await;
    assert_eq!(status, 201);

    let (status, module) = post_json(
        client,
        format!("{}/modules", address),
        json!({ "module_name": "Capitals", "course_id": course["id"] }),
    )
    .await;
    assert_eq!(status, 201);

    (course["id"].as_i64().unwrap(), module["id"].as_i64().unwrap())
}

async fn create_student(client: &reqwest::Client, address: &str, unique_id: &str) -> i64 {
    let (status, student) = post_json(
        client,
        format!("{}/students", address),
        json!({ "unique_id": unique_id, "name": unique_id, "password": "secret1" }),
    )
    .await;
    assert_eq!(status, 201);
    student["id"].as_i64().unwrap()
}

/// `count` single-select questions with options "right" (correct) and "wrong".
fn single_select_questions(count: usize) -> Vec<Value> {
    (0..count)
        .map(|n| {
            json!({
                "question_text": format!("Question {}", n),
                "options": [
                    { "option_text": "right", "is_correct": true },
                    { "option_text": "wrong", "is_correct": false }
                ]
            })
        })
        .collect()
}

async fn create_quiz(
    client: &reqwest::Client,
    address: &str,
    module_id: i64,
    name: &str,
    questions: Vec<Value>,
) -> Value {
    let (status, quiz) = post_json(
        client,
        format!("{}/quizzes", address),
        json!({ "quiz_name": name, "module_id": module_id, "questions": questions }),
    )
    .await;
    assert_eq!(status, 201, "quiz creation failed: {}", quiz);
    quiz
}

/// Answer map picking the correct option for the first `correct` questions
/// and the wrong one for the rest.
fn answers(quiz: &Value, correct: usize) -> Value {
    let mut map = serde_json::Map::new();
    for (n, question) in quiz["questions"].as_array().unwrap().iter().enumerate() {
        let wanted = n < correct;
        let option = question["options"]
            .as_array()
            .unwrap()
            .iter()
            .find(|o| o["is_correct"].as_bool().unwrap() == wanted)
            .unwrap();
        map.insert(question["id"].to_string(), option["id"].clone());
    }
    Value::Object(map)
}

#[tokio::test]
async fn three_of_four_correct_scores_75() {
    // Arrange
    let address = spawn_app().await;
    let client = reqwest::Client::new();
    let (_, module_id) = seed_course(&client, &address).await;
    let student_id = create_student(&client, &address, "student001").await;
    let quiz = create_quiz(&client, &address, module_id, "Quiz A", single_select_questions(4)).await;
    let quiz_id = quiz["id"].as_i64().unwrap();

    // Act
    let (status, receipt) = post_json(
        &client,
        format!("{}/quizzes/{}/submit", address, quiz_id),
        json!({ "student_id": student_id, "answers": answers(&quiz, 3) }),
    )
    .await;

    // Assert
    assert_eq!(status, 201);
    assert_eq!(receipt["score"], 75);
    assert_eq!(receipt["correctAnswers"], 3);
    assert_eq!(receipt["totalQuestions"], 4);
    assert_eq!(receipt["message"], "Quiz submitted successfully");
    let outcomes = receipt["questionResults"].as_array().unwrap();
    assert_eq!(outcomes.len(), 4);
    assert_eq!(outcomes[3]["isCorrect"], false);
    assert_eq!(outcomes[3]["studentAnswer"], "wrong");
    assert_eq!(outcomes[3]["correctAnswer"], "right");

    let (status, result) = get_json(
        &client,
        format!("{}/quizzes/{}/results?student_id={}", address, quiz_id, student_id),
    )
    .await;
    assert_eq!(status, 200);
    assert_eq!(result["score"], 75);
    assert_eq!(result["correctCount"], 3);
    assert_eq!(result["totalQuestions"], 4);
    assert_eq!(result["answers"].as_array().unwrap().len(), 4);
    let first_question = quiz["questions"][0]["id"].to_string();
    assert_eq!(result["correctAnswers"][first_question.as_str()], "right");
}

#[tokio::test]
async fn empty_answer_map_scores_zero() {
    // Arrange
    let address = spawn_app().await;
    let client = reqwest::Client::new();
    let (_, module_id) = seed_course(&client, &address).await;
    let student_id = create_student(&client, &address, "student001").await;
    let quiz = create_quiz(&client, &address, module_id, "Quiz A", single_select_questions(3)).await;

    // Act
    let (status, receipt) = post_json(
        &client,
        format!("{}/quizzes/{}/submit", address, quiz["id"]),
        json!({ "student_id": student_id, "answers": {} }),
    )
    .await;

    // Assert
    assert_eq!(status, 201);
    assert_eq!(receipt["score"], 0);
    assert_eq!(receipt["correctAnswers"], 0);
    for outcome in receipt["questionResults"].as_array().unwrap() {
        assert_eq!(outcome["isCorrect"], false);
        assert_eq!(outcome["studentAnswer"], "No Answer Provided");
    }
}

#[tokio::test]
async fn free_text_answers_ignore_case_and_whitespace() {
    // Arrange
    let address = spawn_app().await;
    let client = reqwest::Client::new();
    let (_, module_id) = seed_course(&client, &address).await;
    let student_id = create_student(&client, &address, "student001").await;
    let quiz = create_quiz(
        &client,
        &address,
        module_id,
        "Capitals",
        vec![json!({
            "question_text": "Capital of France?",
            "question_type": "text",
            "correct_answer": "Paris"
        })],
    )
    .await;
    let question_id = quiz["questions"][0]["id"].to_string();

    // Act
    let (status, receipt) = post_json(
        &client,
        format!("{}/quizzes/{}/submit", address, quiz["id"]),
        json!({ "student_id": student_id, "answers": { question_id: "  pARis " } }),
    )
    .await;

    // Assert
    assert_eq!(status, 201);
    assert_eq!(receipt["score"], 100);
    assert_eq!(receipt["questionResults"][0]["studentAnswer"], "  pARis ");
}

#[tokio::test]
async fn submit_rejects_invalid_input() {
    // Arrange
    let address = spawn_app().await;
    let client = reqwest::Client::new();
    let (_, module_id) = seed_course(&client, &address).await;
    let student_id = create_student(&client, &address, "student001").await;
    let quiz = create_quiz(&client, &address, module_id, "Quiz A", single_select_questions(2)).await;
    let draft = create_quiz(&client, &address, module_id, "Draft", vec![]).await;
    let submit_url = format!("{}/quizzes/{}/submit", address, quiz["id"]);

    // Missing student id
    let (status, body) = post_json(&client, submit_url.clone(), json!({ "answers": {} })).await;
    assert_eq!(status, 400);
    assert!(body["error"].is_string());

    // Missing answers
    let (status, _) = post_json(&client, submit_url.clone(), json!({ "student_id": student_id })).await;
    assert_eq!(status, 400);

    // Malformed body
    let response = client
        .post(&submit_url)
        .header("Content-Type", "application/json")
        .body("{not json")
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(response.status().as_u16(), 400);

    // Quiz without questions
    let (status, _) = post_json(
        &client,
        format!("{}/quizzes/{}/submit", address, draft["id"]),
        json!({ "student_id": student_id, "answers": {} }),
    )
    .await;
    assert_eq!(status, 400);
}

#[tokio::test]
async fn submit_reports_missing_quiz_and_student() {
    // Arrange
    let address = spawn_app().await;
    let client = reqwest::Client::new();
    let (_, module_id) = seed_course(&client, &address).await;
    let student_id = create_student(&client, &address, "student001").await;
    let quiz = create_quiz(&client, &address, module_id, "Quiz A", single_select_questions(2)).await;

    // Act & Assert
    let (status, body) = post_json(
        &client,
        format!("{}/quizzes/9999/submit", address),
        json!({ "student_id": student_id, "answers": {} }),
    )
    .await;
    assert_eq!(status, 404);
    assert_eq!(body["error"], "Quiz not found");

    let (status, body) = post_json(
        &client,
        format!("{}/quizzes/{}/submit", address, quiz["id"]),
        json!({ "student_id": 9999, "answers": {} }),
    )
    .await;
    assert_eq!(status, 404);
    assert_eq!(body["error"], "Student not found");
}

#[tokio::test]
async fn result_lookup_needs_existing_result() {
    // Arrange
    let address = spawn_app().await;
    let client = reqwest::Client::new();
    let (_, module_id) = seed_course(&client, &address).await;
    let student_id = create_student(&client, &address, "student001").await;
    let quiz = create_quiz(&client, &address, module_id, "Quiz A", single_select_questions(2)).await;

    // Act & Assert
    let (status, list) = get_json(&client, format!("{}/quizzes/{}/results", address, quiz["id"])).await;
    assert_eq!(status, 200);
    assert!(list.as_array().unwrap().is_empty());

    let (status, _) = get_json(&client, format!("{}/quizzes/9999/results", address)).await;
    assert_eq!(status, 404);

    let (status, _) = get_json(
        &client,
        format!("{}/quizzes/{}/results?student_id={}", address, quiz["id"], student_id),
    )
    .await;
    assert_eq!(status, 404);

    let (status, _) = get_json(
        &client,
        format!("{}/quizzes/9999/results?student_id={}", address, student_id),
    )
    .await;
    assert_eq!(status, 404);
}

#[tokio::test]
async fn gradebook_lists_every_student_result() {
    // Arrange
    let address = spawn_app().await;
    let client = reqwest::Client::new();
    let (_, module_id) = seed_course(&client, &address).await;
    let first = create_student(&client, &address, "student001").await;
    let second = create_student(&client, &address, "student002").await;
    let quiz = create_quiz(&client, &address, module_id, "Quiz A", single_select_questions(2)).await;
    let submit_url = format!("{}/quizzes/{}/submit", address, quiz["id"]);

    // Act
    post_json(&client, submit_url.clone(), json!({ "student_id": first, "answers": answers(&quiz, 2) })).await;
    post_json(&client, submit_url, json!({ "student_id": second, "answers": answers(&quiz, 1) })).await;

    // Assert
    let (status, list) = get_json(&client, format!("{}/quizzes/{}/results", address, quiz["id"])).await;
    assert_eq!(status, 200);
    let list = list.as_array().unwrap();
    assert_eq!(list.len(), 2);
    let mut scores: Vec<i64> = list.iter().map(|r| r["score"].as_i64().unwrap()).collect();
    scores.sort();
    assert_eq!(scores, vec![50, 100]);

    let (status, mine) = get_json(&client, format!("{}/students/{}/results", address, second)).await;
    assert_eq!(status, 200);
    let mine = mine.as_array().unwrap();
    assert_eq!(mine.len(), 1);
    assert_eq!(mine[0]["quizId"], quiz["id"]);
    assert_eq!(mine[0]["score"], 50);
}

#[tokio::test]
async fn null_and_blank_answers_count_as_unanswered() {
    // Arrange
    let address = spawn_app().await;
    let client = reqwest::Client::new();
    let (_, module_id) = seed_course(&client, &address).await;
    let student_id = create_student(&client, &address, "student001").await;
    let quiz = create_quiz(&client, &address, module_id, "Quiz A", single_select_questions(2)).await;
    let first = quiz["questions"][0]["id"].to_string();
    let second = quiz["questions"][1]["id"].to_string();

    // Act
    let (status, receipt) = post_json(
        &client,
        format!("{}/quizzes/{}/submit", address, quiz["id"]),
        json!({ "student_id": student_id, "answers": { first: null, second: "  " } }),
    )
    .await;

    // Assert
    assert_eq!(status, 201, "submission rejected: {}", receipt);
    assert_eq!(receipt["score"], 0);
    for outcome in receipt["questionResults"].as_array().unwrap() {
        assert_eq!(outcome["isCorrect"], false);
        assert_eq!(outcome["studentAnswer"], "No Answer Provided");
    }
}

#[tokio::test]
async fn concurrent_submissions_keep_a_single_result() {
    // Arrange
    let address = spawn_app().await;
    let client = reqwest::Client::new();
    let (_, module_id) = seed_course(&client, &address).await;
    let student_id = create_student(&client, &address, "student001").await;
    let quiz = create_quiz(&client, &address, module_id, "Quiz A", single_select_questions(2)).await;
    let submit_url = format!("{}/quizzes/{}/submit", address, quiz["id"]);

    // Act
    let (a, b) = tokio::join!(
        post_json(&client, submit_url.clone(), json!({ "student_id": student_id, "answers": answers(&quiz, 1) })),
        post_json(&client, submit_url.clone(), json!({ "student_id": student_id, "answers": answers(&quiz, 2) })),
    );

    // Assert
    assert_eq!(a.0, 201);
    assert_eq!(b.0, 201);
    let (_, list) = get_json(&client, format!("{}/quizzes/{}/results", address, quiz["id"])).await;
    let list = list.as_array().unwrap();
    assert_eq!(list.len(), 1);
    let score = list[0]["score"].as_i64().unwrap();
    assert!(score == 50 || score == 100);
}

#[tokio::test]
async fn resubmission_replaces_previous_result() {
    // Arrange
    let address = spawn_app().await;
    let client = reqwest::Client::new();
    let (_, module_id) = seed_course(&client, &address).await;
    let student_id = create_student(&client, &address, "student001").await;
    let quiz = create_quiz(&client, &address, module_id, "Quiz A", single_select_questions(4)).await;
    let submit_url = format!("{}/quizzes/{}/submit", address, quiz["id"]);

    // Act
    post_json(&client, submit_url.clone(), json!({ "student_id": student_id, "answers": answers(&quiz, 1) })).await;
    post_json(&client, submit_url, json!({ "student_id": student_id, "answers": answers(&quiz, 4) })).await;

    // Assert
    let (status, summary) = get_json(&client, format!("{}/quizzes/{}/summary", address, quiz["id"])).await;
    assert_eq!(status, 200);
    assert_eq!(summary["resultCount"], 1);
    assert_eq!(summary["averageScore"], 100);

    let (_, result) = get_json(
        &client,
        format!("{}/quizzes/{}/results?student_id={}", address, quiz["id"], student_id),
    )
    .await;
    assert_eq!(result["score"], 100);
    assert_eq!(result["answers"].as_array().unwrap().len(), 4);
}

#[tokio::test]
async fn course_results_average_each_quiz() {
    // Arrange
    let address = spawn_app().await;
    let client = reqwest::Client::new();
    let (course_id, module_id) = seed_course(&client, &address).await;
    let quiz_a = create_quiz(&client, &address, module_id, "Quiz A", single_select_questions(10)).await;
    create_quiz(&client, &address, module_id, "Quiz B", single_select_questions(2)).await;

    for (n, correct) in [8, 9, 10].into_iter().enumerate() {
        let student_id = create_student(&client, &address, &format!("student00{}", n)).await;
        let (status, _) = post_json(
            &client,
            format!("{}/quizzes/{}/submit", address, quiz_a["id"]),
            json!({ "student_id": student_id, "answers": answers(&quiz_a, correct) }),
        )
        .await;
        assert_eq!(status, 201);
    }

    // Act
    let (status, rollup) = get_json(&client, format!("{}/courses/{}/results", address, course_id)).await;

    // Assert
    assert_eq!(status, 200);
    let rollup = rollup.as_array().unwrap();
    assert_eq!(rollup.len(), 2);
    assert_eq!(rollup[0]["quizName"], "Quiz A");
    assert_eq!(rollup[0]["totalScore"], 270);
    assert_eq!(rollup[0]["averageScore"], 90);
    assert_eq!(rollup[0]["resultCount"], 3);
    assert_eq!(rollup[1]["quizName"], "Quiz B");
    assert!(rollup[1]["averageScore"].is_null());
    assert_eq!(rollup[1]["resultCount"], 0);
}

#[tokio::test]
async fn course_results_need_course_with_quizzes() {
    // Arrange
    let address = spawn_app().await;
    let client = reqwest::Client::new();
    let (course_id, _) = seed_course(&client, &address).await;

    // Act & Assert
    let (status, body) = get_json(&client, format!("{}/courses/{}/results", address, course_id)).await;
    assert_eq!(status, 404);
    assert_eq!(body["error"], "No quizzes found for this course");

    let (status, body) = get_json(&client, format!("{}/courses/9999/results", address)).await;
    assert_eq!(status, 404);
    assert_eq!(body["error"], "Course not found");
}

#[tokio::test]
async fn student_course_scores_cover_every_quiz() {
    // Arrange
    let address = spawn_app().await;
    let client = reqwest::Client::new();
    let (course_id, module_id) = seed_course(&client, &address).await;
    let student_id = create_student(&client, &address, "student001").await;
    let quiz_a = create_quiz(&client, &address, module_id, "Quiz A", single_select_questions(3)).await;
    create_quiz(&client, &address, module_id, "Quiz B", single_select_questions(2)).await;

    post_json(
        &client,
        format!("{}/quizzes/{}/submit", address, quiz_a["id"]),
        json!({ "student_id": student_id, "answers": answers(&quiz_a, 1) }),
    )
    .await;

    // Act
    let (status, scores) = get_json(
        &client,
        format!("{}/quizzes/course/{}/student/{}", address, course_id, student_id),
    )
    .await;

    // Assert
    assert_eq!(status, 200);
    let scores = scores.as_array().unwrap();
    assert_eq!(scores.len(), 2);
    assert_eq!(scores[0]["score"], 1);
    assert_eq!(scores[0]["totalQuestions"], 3);
    assert_eq!(scores[0]["percentageScore"], 33);
    assert_eq!(scores[0]["attempted"], true);
    assert_eq!(scores[1]["percentageScore"], 0);
    assert_eq!(scores[1]["attempted"], false);

    let (status, _) = get_json(
        &client,
        format!("{}/quizzes/course/{}/student/9999", address, course_id),
    )
    .await;
    assert_eq!(status, 404);
}

#[tokio::test]
async fn quiz_round_trip_preserves_answer_key() {
    // Arrange
    let address = spawn_app().await;
    let client = reqwest::Client::new();
    let (course_id, module_id) = seed_course(&client, &address).await;
    let questions = vec![
        json!({
            "question_text": "Largest ocean?",
            "options": [
                { "option_text": "Atlantic" },
                { "option_text": "Pacific", "is_correct": true },
                { "option_text": "Indian" }
            ]
        }),
        json!({
            "question_text": "Capital of Japan?",
            "question_type": "text",
            "correct_answer": "Tokyo"
        }),
    ];

    // Act
    let created = create_quiz(&client, &address, module_id, "Mixed", questions).await;
    let (status, fetched) = get_json(&client, format!("{}/quizzes/{}", address, created["id"])).await;

    // Assert
    assert_eq!(status, 200);
    assert_eq!(fetched["quiz_name"], "Mixed");
    let questions = fetched["questions"].as_array().unwrap();
    assert_eq!(questions.len(), 2);
    let options = questions[0]["options"].as_array().unwrap();
    assert_eq!(options.len(), 3);
    assert_eq!(options[1]["option_text"], "Pacific");
    assert_eq!(options[1]["is_correct"], true);
    assert_eq!(options.iter().filter(|o| o["is_correct"] == true).count(), 1);
    assert_eq!(questions[1]["question_type"], "text");
    assert_eq!(questions[1]["correct_text"], "Tokyo");

    // The student view hides the key.
    let (status, public) = get_json(&client, format!("{}/quizzes/{}/take", address, created["id"])).await;
    assert_eq!(status, 200);
    assert!(public["questions"][0]["options"][1].get("is_correct").is_none());
    assert!(public["questions"][1].get("correct_text").is_none());

    let (_, by_module) = get_json(&client, format!("{}/quizzes/module/{}", address, module_id)).await;
    assert_eq!(by_module.as_array().unwrap().len(), 1);
    let (_, by_course) = get_json(&client, format!("{}/quizzes/course/{}", address, course_id)).await;
    assert_eq!(by_course.as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn replacing_a_quiz_swaps_the_question_set() {
    // Arrange
    let address = spawn_app().await;
    let client = reqwest::Client::new();
    let (_, module_id) = seed_course(&client, &address).await;
    let student_id = create_student(&client, &address, "student001").await;
    let quiz = create_quiz(&client, &address, module_id, "Quiz A", single_select_questions(4)).await;
    post_json(
        &client,
        format!("{}/quizzes/{}/submit", address, quiz["id"]),
        json!({ "student_id": student_id, "answers": answers(&quiz, 4) }),
    )
    .await;

    // Act
    let response = client
        .put(&format!("{}/quizzes/{}", address, quiz["id"]))
        .json(&json!({ "quiz_name": "Quiz A (v2)", "questions": single_select_questions(2) }))
        .send()
        .await
        .expect("Failed to execute request");

    // Assert
    assert_eq!(response.status().as_u16(), 200);
    let replaced: Value = response.json().await.unwrap();
    assert_eq!(replaced["quiz_name"], "Quiz A (v2)");
    assert_eq!(replaced["module_id"], module_id);
    assert_eq!(replaced["questions"].as_array().unwrap().len(), 2);

    // Stored outcomes keep their snapshots after the edit.
    let (status, result) = get_json(
        &client,
        format!("{}/quizzes/{}/results?student_id={}", address, quiz["id"], student_id),
    )
    .await;
    assert_eq!(status, 200);
    assert_eq!(result["score"], 100);
    let outcomes = result["answers"].as_array().unwrap();
    assert_eq!(outcomes.len(), 4);
    assert!(outcomes[0]["questionId"].is_null());
    assert_eq!(outcomes[0]["questionText"], "Question 0");

    let response = client
        .put(&format!("{}/quizzes/9999", address))
        .json(&json!({ "quiz_name": "Ghost", "questions": [] }))
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(response.status().as_u16(), 404);
}

#[tokio::test]
async fn quiz_creation_validates_answer_keys() {
    // Arrange
    let address = spawn_app().await;
    let client = reqwest::Client::new();
    let (_, module_id) = seed_course(&client, &address).await;

    // Two correct options
    let (status, _) = post_json(
        &client,
        format!("{}/quizzes", address),
        json!({
            "quiz_name": "Broken",
            "module_id": module_id,
            "questions": [{
                "question_text": "Pick one",
                "options": [
                    { "option_text": "a", "is_correct": true },
                    { "option_text": "b", "is_correct": true }
                ]
            }]
        }),
    )
    .await;
    assert_eq!(status, 400);

    // Missing module
    let (status, _) = post_json(
        &client,
        format!("{}/quizzes", address),
        json!({ "quiz_name": "Orphan", "questions": single_select_questions(1) }),
    )
    .await;
    assert_eq!(status, 400);

    // Unknown module
    let (status, _) = post_json(
        &client,
        format!("{}/quizzes", address),
        json!({ "quiz_name": "Orphan", "module_id": 9999, "questions": single_select_questions(1) }),
    )
    .await;
    assert_eq!(status, 404);
}

#[tokio::test]
async fn deleting_a_quiz_removes_its_results() {
    // Arrange
    let address = spawn_app().await;
    let client = reqwest::Client::new();
    let (_, module_id) = seed_course(&client, &address).await;
    let student_id = create_student(&client, &address, "student001").await;
    let quiz = create_quiz(&client, &address, module_id, "Quiz A", single_select_questions(2)).await;
    post_json(
        &client,
        format!("{}/quizzes/{}/submit", address, quiz["id"]),
        json!({ "student_id": student_id, "answers": answers(&quiz, 2) }),
    )
    .await;

    // Act
    let response = client
        .delete(&format!("{}/quizzes/{}", address, quiz["id"]))
        .send()
        .await
        .expect("Failed to execute request");

    // Assert
    assert_eq!(response.status().as_u16(), 200);
    let (status, _) = get_json(&client, format!("{}/quizzes/{}", address, quiz["id"])).await;
    assert_eq!(status, 404);
    let (status, _) = get_json(&client, format!("{}/quizzes/{}/summary", address, quiz["id"])).await;
    assert_eq!(status, 404);
}
