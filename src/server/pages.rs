//! Server-rendered HTML for the library site.

use html_escape::{encode_double_quoted_attribute, encode_text};

use crate::entity::Story;

const BASE_STYLE: &str = r#"
        * { box-sizing: border-box; }
        body {
            margin: 0;
            font-family: Arial, sans-serif;
            background: linear-gradient(135deg, #667eea 0%, #764ba2 100%);
            min-height: 100vh;
            padding: 20px;
        }
        .container {
            background: white;
            border-radius: 15px;
            box-shadow: 0 10px 40px rgba(0, 0, 0, 0.3);
            padding: 40px;
            max-width: 700px;
            margin: 0 auto;
        }
        h1 { color: #667eea; margin-top: 0; }
        button, .button {
            display: block;
            width: 100%;
            padding: 12px;
            margin: 10px 0;
            background: #667eea;
            color: white;
            border: none;
            border-radius: 8px;
            cursor: pointer;
            font-size: 16px;
            font-weight: bold;
            text-align: center;
            text-decoration: none;
        }
        button:hover, .button:hover { background: #764ba2; }
"#;

const READER_STYLE: &str = r#"
        body { font-family: Georgia, serif; }
        .story-text {
            font-size: 20px;
            line-height: 1.8;
            color: #333;
            margin: 30px 0;
            min-height: 100px;
            padding: 20px;
            background: #f9f9f9;
            border-left: 4px solid #667eea;
            border-radius: 5px;
        }
        .progress { text-align: center; color: #999; font-size: 14px; }
        .hint {
            text-align: center;
            color: #667eea;
            font-weight: bold;
            margin-top: 20px;
            padding: 15px;
            background: #f0f0f0;
            border-radius: 8px;
        }
        .nav-buttons { display: flex; gap: 10px; margin-top: 20px; }
        .nav-buttons a { flex: 1; background: #999; }
"#;

const GALLERY_STYLE: &str = r#"
        .container { background: none; box-shadow: none; max-width: 900px; }
        h1 { color: white; text-align: center; }
        .stories-grid {
            display: grid;
            grid-template-columns: repeat(auto-fill, minmax(280px, 1fr));
            gap: 20px;
        }
        .story-card {
            background: white;
            border-radius: 10px;
            padding: 20px;
            box-shadow: 0 5px 15px rgba(0, 0, 0, 0.2);
        }
        .story-card h2 { color: #667eea; margin: 0 0 10px 0; }
        .story-card p { color: #666; font-size: 14px; }
        .back { display: inline-block; width: auto; background: white; color: #667eea; }
"#;

const ADMIN_STYLE: &str = r#"
        body { background: #f0f0f0; }
        .container { max-width: 1000px; }
        .admin-grid { display: grid; grid-template-columns: 1fr 1fr; gap: 20px; }
        input, textarea {
            width: 100%;
            padding: 10px;
            margin: 5px 0;
            border: 1px solid #ddd;
            border-radius: 5px;
            font-family: inherit;
        }
        textarea { min-height: 100px; }
        .story-list { max-height: 400px; overflow-y: auto; }
        .story-item {
            background: #f9f9f9;
            padding: 10px;
            margin: 5px 0;
            border-radius: 5px;
            display: flex;
            justify-content: space-between;
            align-items: center;
        }
        .story-item button { width: auto; margin: 0 5px; background: #e74c3c; }
        .story-item button:hover { background: #c0392b; }
"#;

const PREVIEW_CHARS: usize = 100;

/// JSON literal safe to place inside a `<script>` element.
pub fn script_json<T: serde::Serialize + ?Sized>(value: &T) -> String {
    serde_json::to_string(value)
        .unwrap_or_else(|_| "null".to_string())
        .replace("</", "<\\/")
}

fn page(title: &str, style: &str, body: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="utf-8" />
    <meta name="viewport" content="width=device-width, initial-scale=1" />
    <title>{title}</title>
    <style>{BASE_STYLE}{style}</style>
</head>
<body>
{body}
</body>
</html>"#,
        title = encode_text(title),
    )
}

pub fn landing() -> String {
    let body = r#"    <div class="container">
        <h1>Adventure Game</h1>
        <p>Embark on an epic journey</p>
        <a class="button" href="/play/1">Start Game</a>
        <a class="button" href="/stories">View All Stories</a>
        <p style="text-align: center; color: #999;">OR</p>
        <button onclick="goToAdmin()">Admin Panel</button>
    </div>
    <script>
        function goToAdmin() {
            const pass = prompt('Enter admin password:');
            if (pass) {
                window.location.href = '/admin?adminKey=' + encodeURIComponent(pass);
            }
        }
    </script>"#;
    page("Adventure Game", "", body)
}

/// Reader page that reveals `sentences` one per Enter key press.
pub fn reader(story: &Story, sentences: &[String]) -> String {
    let title = story.title_or_untitled();
    let body = format!(
        r#"    <div class="container">
        <h1>{title}</h1>
        <div class="story-text" id="storyDisplay"></div>
        <div class="progress"><span id="progressText">Line 1 of {count}</span></div>
        <div class="hint">Press ENTER for next line</div>
        <div class="nav-buttons">
            <a class="button" href="/">Home</a>
            <a class="button" href="/stories">All Stories</a>
            <a class="button" href="/play/{id}">Start Over</a>
        </div>
    </div>
    <script>
        const sentences = {sentences};
        let currentLine = 0;

        function displayLinesToCurrent() {{
            const shown = sentences.slice(0, currentLine + 1).join(' ');
            document.getElementById('storyDisplay').textContent = shown;
            document.getElementById('progressText').textContent =
                'Line ' + (currentLine + 1) + ' of ' + sentences.length;
        }}

        displayLinesToCurrent();

        document.addEventListener('keydown', (e) => {{
            if (e.key !== 'Enter') return;
            e.preventDefault();
            if (currentLine < sentences.length - 1) {{
                currentLine++;
                displayLinesToCurrent();
            }} else {{
                window.location.href = '/';
            }}
        }});
    </script>"#,
        title = encode_text(title),
        count = sentences.len(),
        id = encode_double_quoted_attribute(&story.id.to_string()),
        sentences = script_json(sentences),
    );
    page(title, READER_STYLE, &body)
}

/// Gallery of every story with a short preview.
pub fn gallery(stories: &[Story]) -> String {
    let cards: String = stories
        .iter()
        .map(|story| {
            let preview: String = story.text().chars().take(PREVIEW_CHARS).collect();
            format!(
                r#"
            <div class="story-card">
                <h2>{title}</h2>
                <p>by {author}</p>
                <p>{preview}...</p>
                <a class="button" href="/play/{id}">Read Story</a>
            </div>"#,
                title = encode_text(story.title_or_untitled()),
                author = encode_text(story.author.as_deref().unwrap_or("Unknown")),
                preview = encode_text(&preview),
                id = encode_double_quoted_attribute(&story.id.to_string()),
            )
        })
        .collect();

    let body = format!(
        r#"    <div class="container">
        <h1>All Stories</h1>
        <div class="stories-grid">{cards}
        </div>
        <p style="text-align: center;"><a class="button back" href="/">Back to Home</a></p>
    </div>"#
    );
    page("All Stories", GALLERY_STYLE, &body)
}

/// Admin dashboard. `admin_key` is echoed into the page script so its
/// requests can carry the `x-admin-key` header.
pub fn admin(stories: &[Story], admin_key: &str) -> String {
    let items: String = stories
        .iter()
        .map(|story| {
            format!(
                r#"
                    <div class="story-item">
                        <span>{title} (ID: {id})</span>
                        <button onclick="deleteStory({id_json})">Delete</button>
                    </div>"#,
                title = encode_text(story.title_or_untitled()),
                id = encode_text(&story.id.to_string()),
                id_json = encode_double_quoted_attribute(&script_json(&story.id)),
            )
        })
        .collect();

    let body = format!(
        r#"    <div class="container">
        <h1>Admin Panel</h1>
        <div class="admin-grid">
            <div>
                <h2>Create New Story</h2>
                <input type="text" id="title" placeholder="Story Title" />
                <input type="text" id="author" placeholder="Author Name" />
                <textarea id="content" placeholder="Story Content"></textarea>
                <button onclick="createStory()">Create Story</button>
            </div>
            <div>
                <h2>Manage Stories</h2>
                <div class="story-list" id="storyList">{items}
                </div>
            </div>
        </div>
        <a class="button" href="/">Back to Home</a>
    </div>
    <script>
        const adminKey = {key};

        async function createStory() {{
            const title = document.getElementById('title').value;
            const author = document.getElementById('author').value;
            const content = document.getElementById('content').value;

            if (!title || !author || !content) {{
                alert('Please fill all fields');
                return;
            }}

            const response = await fetch('/api/admin/stories', {{
                method: 'POST',
                headers: {{ 'Content-Type': 'application/json', 'x-admin-key': adminKey }},
                body: JSON.stringify({{ title, author, content }})
            }});
            if (response.ok) {{
                alert('Story created!');
                location.reload();
            }} else {{
                alert('Error creating story');
            }}
        }}

        async function deleteStory(id) {{
            if (!confirm('Delete this story?')) return;

            const response = await fetch('/api/admin/stories/' + id, {{
                method: 'DELETE',
                headers: {{ 'x-admin-key': adminKey }}
            }});
            if (response.ok) {{
                alert('Story deleted!');
                location.reload();
            }} else {{
                alert('Error deleting story');
            }}
        }}
    </script>"#,
        key = script_json(admin_key),
    );
    page("Admin Panel", ADMIN_STYLE, &body)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entity::Choice;

    fn story(id: u64, title: &str, content: &str) -> Story {
        Story::library(
            id,
            title.to_string(),
            "Ada".to_string(),
            content.to_string(),
            vec![Choice::back()],
        )
    }

    #[test]
    fn test_markup_in_story_text_is_escaped() {
        let mut s = story(4, r#"<b>"Tom" & Jerry</b>"#, "Hi.");
        s.id = crate::entity::StoryId::token(r#"x" onmouseover="alert(1)"#);
        let html = gallery(&[s]);
        assert!(html.contains("<h2>&lt;b&gt;\"Tom\" &amp; Jerry&lt;/b&gt;</h2>"));
        assert!(html.contains(r#"href="/play/x&quot; onmouseover=&quot;alert(1)""#));
        assert!(!html.contains("<b>"));
    }

    #[test]
    fn test_script_json_cannot_close_script() {
        let json = script_json(&vec!["</script><script>alert(1)</script>"]);
        assert!(!json.contains("</script>"));
        assert!(json.starts_with("[\"<\\/script>"));
    }

    #[test]
    fn test_reader_embeds_sentences() {
        let s = story(1, "T", "Hi. Bye.");
        let html = reader(&s, &["Hi.".to_string(), "Bye.".to_string()]);
        assert!(html.contains(r#"const sentences = ["Hi.","Bye."];"#));
        assert!(html.contains("Line 1 of 2"));
        assert!(html.contains("<title>T</title>"));
        assert!(html.contains(r#"href="/play/1">Start Over"#));
    }

    #[test]
    fn test_gallery_previews_and_escapes() {
        let long = "x".repeat(150);
        let html = gallery(&[story(1, "<Evil>", &long), story(2, "Calm", "Short.")]);
        assert!(html.contains("&lt;Evil&gt;"));
        assert!(!html.contains("<Evil>"));
        assert!(html.contains(&format!("{}...", "x".repeat(100))));
        assert!(!html.contains(&"x".repeat(101)));
        assert!(html.contains(r#"href="/play/2""#));
    }

    #[test]
    fn test_admin_lists_stories_and_key() {
        let html = admin(&[story(3, "Third", "C.")], "admin123");
        assert!(html.contains("Third (ID: 3)"));
        assert!(html.contains("deleteStory(3)"));
        assert!(html.contains(r#"const adminKey = "admin123";"#));
    }

    #[test]
    fn test_landing_links() {
        let html = landing();
        assert!(html.contains("/play/1"));
        assert!(html.contains("/stories"));
        assert!(html.contains("/admin?adminKey="));
    }
}
