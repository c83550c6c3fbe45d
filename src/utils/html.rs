/// Clean HTML content using the ammonia library.
///
/// Question statements are rendered as HTML by the frontend, so safe tags
/// (like <b>, <code>, <p>) are kept while <script>, <iframe> and event
/// handler attributes are stripped.
pub fn clean_html(input: &str) -> String {
    ammonia::clean(input)
}
