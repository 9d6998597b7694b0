/// Joins path segments into a single rooted, cleaned path
///
/// Each segment may itself contain `/`. Empty and `.` elements are dropped,
/// `..` removes the element before it and is ignored at the root. The result
/// always starts with `/` and has no trailing slash (except the root itself).
pub fn join<I, S>(segments: I) -> String
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut parts: Vec<String> = Vec::new();
    for segment in segments {
        for part in segment.as_ref().split('/') {
            match part {
                "" | "." => {}
                ".." => {
                    parts.pop();
                }
                part => parts.push(part.to_string()),
            }
        }
    }
    format!("/{}", parts.join("/"))
}
