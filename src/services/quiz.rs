// src/services/quiz.rs

use async_trait::async_trait;
use rand::Rng;
use sqlx::{QueryBuilder, Sqlite, SqlitePool};
use validator::Validate;

use crate::{
    error::AppError,
    models::{
        question::{Question, QuestionStatus},
        quiz::{CreateQuizRequest, NewQuiz, Quiz, QuizDto, QuizQuestionDetails, QuizType, QuizWithQuestions},
    },
};

/// Quiz persistence operations shared by the REST handlers and the command handlers.
#[async_trait]
pub trait QuizService: Send + Sync {
    /// Deletes the quiz and its quiz questions.
    async fn remove_quiz(&self, quiz_id: i64) -> Result<(), AppError>;

    /// Overwrites the quiz's fields with the given ones.
    async fn update_quiz(&self, quiz_id: i64, quiz: &QuizDto) -> Result<Quiz, AppError>;
}

/// `QuizService` backed by the application database.
#[derive(Clone)]
pub struct SqlQuizService {
    pool: SqlitePool,
}

impl SqlQuizService {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl QuizService for SqlQuizService {
    async fn remove_quiz(&self, quiz_id: i64) -> Result<(), AppError> {
        remove_quiz(&self.pool, quiz_id).await
    }

    async fn update_quiz(&self, quiz_id: i64, quiz: &QuizDto) -> Result<Quiz, AppError> {
        update_quiz(&self.pool, quiz_id, quiz).await
    }
}

const QUIZ_COLUMNS: &str =
    "id, course_execution_id, title, generation_date, year, quiz_type, series, version";

pub async fn find_quiz(pool: &SqlitePool, quiz_id: i64) -> Result<Quiz, AppError> {
    sqlx::query_as::<_, Quiz>(&format!("SELECT {} FROM quizzes WHERE id = ?", QUIZ_COLUMNS))
        .bind(quiz_id)
        .fetch_optional(pool)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Quiz {} not found", quiz_id)))
}

pub async fn find_quiz_with_questions(
    pool: &SqlitePool,
    quiz_id: i64,
) -> Result<QuizWithQuestions, AppError> {
    let quiz = find_quiz(pool, quiz_id).await?;

    let questions = sqlx::query_as::<_, QuizQuestionDetails>(
        r#"
        SELECT qq.id, qq.sequence, qq.question_id, q.title, q.content, q.question_type
        FROM quiz_questions qq
        JOIN questions q ON q.id = qq.question_id
        WHERE qq.quiz_id = ?
        ORDER BY qq.sequence
        "#,
    )
    .bind(quiz_id)
    .fetch_all(pool)
    .await?;

    Ok(QuizWithQuestions { quiz, questions })
}

/// Returns the course an execution belongs to.
pub async fn execution_course_id(pool: &SqlitePool, execution_id: i64) -> Result<i64, AppError> {
    sqlx::query_scalar::<_, i64>("SELECT course_id FROM course_executions WHERE id = ?")
        .bind(execution_id)
        .fetch_optional(pool)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Course execution {} not found", execution_id)))
}

pub async fn list_execution_quizzes(
    pool: &SqlitePool,
    execution_id: i64,
) -> Result<Vec<Quiz>, AppError> {
    execution_course_id(pool, execution_id).await?;

    let quizzes = sqlx::query_as::<_, Quiz>(&format!(
        "SELECT {} FROM quizzes WHERE course_execution_id = ? ORDER BY id",
        QUIZ_COLUMNS
    ))
    .bind(execution_id)
    .fetch_all(pool)
    .await?;

    Ok(quizzes)
}

/// Questions of the course that may be drawn into a generated quiz.
/// A non-empty `topic_ids` keeps only questions tagged with one of those topics.
pub async fn active_questions(
    pool: &SqlitePool,
    course_id: i64,
    topic_ids: &[i64],
) -> Result<Vec<Question>, AppError> {
    let mut query = QueryBuilder::<Sqlite>::new(
        r#"
        SELECT id, course_id, title, content, question_type, status, correct_answer, created_at
        FROM questions
        WHERE course_id = "#,
    );
    query
        .push_bind(course_id)
        .push(" AND status = ")
        .push_bind(QuestionStatus::Available);

    if !topic_ids.is_empty() {
        query.push(" AND id IN (SELECT question_id FROM question_topics WHERE topic_id IN (");
        let mut topics = query.separated(", ");
        for topic_id in topic_ids {
            topics.push_bind(*topic_id);
        }
        topics.push_unseparated("))");
    }

    query.push(" ORDER BY id");

    let questions = query.build_query_as::<Question>().fetch_all(pool).await?;
    Ok(questions)
}

/// Generates a quiz for the execution from its course's active questions and stores it.
///
/// When `topic_ids` is not empty the draw is restricted to questions of those
/// topics, which must all belong to the execution's course.
pub async fn generate_quiz<R: Rng + Send>(
    pool: &SqlitePool,
    execution_id: i64,
    title: &str,
    quiz_size: usize,
    topic_ids: &[i64],
    rng: &mut R,
) -> Result<QuizWithQuestions, AppError> {
    let course_id = execution_course_id(pool, execution_id).await?;

    for topic_id in topic_ids {
        let owner = sqlx::query_scalar::<_, i64>("SELECT course_id FROM topics WHERE id = ?")
            .bind(topic_id)
            .fetch_optional(pool)
            .await?;
        if owner != Some(course_id) {
            return Err(AppError::BadRequest(format!(
                "Topic {} does not belong to the course of execution {}",
                topic_id, execution_id
            )));
        }
    }

    let candidates = active_questions(pool, course_id, topic_ids).await?;

    let mut quiz = NewQuiz::new(title, QuizType::Generated);
    quiz.generate(quiz_size, &candidates, rng)?;

    let quiz_id = persist_quiz(pool, execution_id, &quiz).await?;
    tracing::info!(
        "Generated quiz {} with {} questions for execution {}",
        quiz_id,
        quiz_size,
        execution_id
    );

    find_quiz_with_questions(pool, quiz_id).await
}

/// Creates a quiz from explicit question ids, sequenced in the given order.
/// Every question must belong to the execution's course.
pub async fn create_quiz(
    pool: &SqlitePool,
    execution_id: i64,
    req: &CreateQuizRequest,
) -> Result<QuizWithQuestions, AppError> {
    let course_id = execution_course_id(pool, execution_id).await?;

    let mut quiz = NewQuiz::new(req.title.clone(), req.quiz_type);
    quiz.year = req.year;
    quiz.series = req.series;
    quiz.version = req.version.clone();

    for question_id in &req.question_ids {
        let owner = sqlx::query_scalar::<_, Option<i64>>("SELECT course_id FROM questions WHERE id = ?")
            .bind(question_id)
            .fetch_optional(pool)
            .await?
            .ok_or_else(|| AppError::BadRequest(format!("Question {} does not exist", question_id)))?;

        if owner != Some(course_id) {
            return Err(AppError::BadRequest(format!(
                "Question {} does not belong to the course of execution {}",
                question_id, execution_id
            )));
        }

        quiz.add_question(*question_id)?;
    }

    let quiz_id = persist_quiz(pool, execution_id, &quiz).await?;
    find_quiz_with_questions(pool, quiz_id).await
}

async fn persist_quiz(pool: &SqlitePool, execution_id: i64, quiz: &NewQuiz) -> Result<i64, AppError> {
    let mut tx = pool.begin().await?;

    let quiz_id = sqlx::query(
        r#"
        INSERT INTO quizzes (course_execution_id, title, generation_date, year, quiz_type, series, version)
        VALUES (?, ?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(execution_id)
    .bind(&quiz.title)
    .bind(quiz.generation_date)
    .bind(quiz.year)
    .bind(quiz.quiz_type)
    .bind(quiz.series)
    .bind(&quiz.version)
    .execute(&mut *tx)
    .await?
    .last_insert_rowid();

    for quiz_question in quiz.questions() {
        sqlx::query("INSERT INTO quiz_questions (quiz_id, question_id, sequence) VALUES (?, ?, ?)")
            .bind(quiz_id)
            .bind(quiz_question.question_id)
            .bind(quiz_question.sequence)
            .execute(&mut *tx)
            .await?;
    }

    tx.commit().await?;
    Ok(quiz_id)
}

/// Deletes a quiz. Quizzes that already have answers cannot be removed.
pub async fn remove_quiz(pool: &SqlitePool, quiz_id: i64) -> Result<(), AppError> {
    let mut tx = pool.begin().await?;

    let exists = sqlx::query_scalar::<_, i64>("SELECT id FROM quizzes WHERE id = ?")
        .bind(quiz_id)
        .fetch_optional(&mut *tx)
        .await?;
    if exists.is_none() {
        return Err(AppError::NotFound(format!("Quiz {} not found", quiz_id)));
    }

    let answers = sqlx::query_scalar::<_, i64>(
        r#"
        SELECT COUNT(*)
        FROM question_answers qa
        JOIN quiz_questions qq ON qq.id = qa.quiz_question_id
        WHERE qq.quiz_id = ?
        "#,
    )
    .bind(quiz_id)
    .fetch_one(&mut *tx)
    .await?;
    if answers > 0 {
        return Err(AppError::Conflict(format!(
            "Quiz {} already has {} answers",
            quiz_id, answers
        )));
    }

    sqlx::query("DELETE FROM quizzes WHERE id = ?")
        .bind(quiz_id)
        .execute(&mut *tx)
        .await?;

    tx.commit().await?;
    tracing::info!("Removed quiz {}", quiz_id);
    Ok(())
}

/// Applies the fields of `dto` to an existing quiz.
/// Generation date and type are only replaced when given.
pub async fn update_quiz(pool: &SqlitePool, quiz_id: i64, dto: &QuizDto) -> Result<Quiz, AppError> {
    dto.validate()?;

    let current = find_quiz(pool, quiz_id).await?;

    if dto.quiz_type == Some(QuizType::Generated) && current.quiz_type != QuizType::Generated {
        return Err(AppError::BadRequest(format!(
            "Quiz {} was not generated and cannot be marked GENERATED",
            quiz_id
        )));
    }

    sqlx::query(
        r#"
        UPDATE quizzes
        SET title = ?, generation_date = ?, year = ?, quiz_type = ?, series = ?, version = ?
        WHERE id = ?
        "#,
    )
    .bind(&dto.title)
    .bind(dto.date.or(current.generation_date))
    .bind(dto.year)
    .bind(dto.quiz_type.unwrap_or(current.quiz_type))
    .bind(dto.series)
    .bind(&dto.version)
    .bind(quiz_id)
    .execute(pool)
    .await?;

    find_quiz(pool, quiz_id).await
}
