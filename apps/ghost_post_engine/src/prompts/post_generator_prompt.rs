use crate::generation::generation_types::{Platform, Tone};

pub struct PostGeneratorPrompt;

impl PostGeneratorPrompt {
    pub const POST_COUNT: usize = 3;

    pub fn get_schema() -> &'static str {
        r#"{
            "type": "object",
            "properties": {
                "title": {
                    "type": ["string", "null"]
                },
                "posts": {
                    "type": "array",
                    "items": { "type": "string" }
                },
                "items": {
                    "type": "array",
                    "items": { "type": "string" }
                }
            },
            "anyOf": [
                { "required": ["posts"] },
                { "required": ["items"] }
            ]
        }"#
    }

    pub fn get_prompt(content: &str, tone: &Tone, platform: Platform) -> String {
        match platform {
            Platform::LinkedIn => Self::linkedin_prompt(content.trim(), tone),
            Platform::Twitter => Self::twitter_prompt(content.trim(), tone),
        }
    }

    fn emoji_rule(tone: &Tone) -> &'static str {
        match tone {
            Tone::Professional => "Do NOT use emoji.",
            Tone::Funny | Tone::Crazy => "You may use one or two emoji per post, never more.",
            Tone::Custom(_) => {
                "Only use emoji if they genuinely fit the requested tone, and never more than two per post."
            }
        }
    }

    fn linkedin_prompt(content: &str, tone: &Tone) -> String {
        format!(
            r#"You are a LinkedIn content expert and ghostwriter.

A user has given you the following raw text (it could be an article link, messy notes, or a brain-dump):

---
{content}
---

Using that as source material, write exactly {count} distinct LinkedIn posts in a **{tone}** tone.

Make each post a different shape:
1. A story-driven post that opens with a personal moment or observation.
2. An insight post that makes one clear argument and backs it up.
3. A practical post built around a short list of takeaways or steps.

Rules:
- Each post should be self-contained and ready to copy-paste into LinkedIn.
- Use short paragraphs, line breaks, and hooks that grab attention.
- Keep each post under {max_chars} characters.
- Do NOT use hashtags or "—" in the posts.
- Do NOT number or label the posts (no "Post 1", "Post 2", no headers).
- {emoji_rule}

Also write a short title (at most 8 words) that summarizes the topic.

Return ONLY valid JSON in this exact format (no markdown, no code fences, no text before or after):
{{
  "title": "Short topic title here",
  "posts": [
    "Full text of post 1 here",
    "Full text of post 2 here",
    "Full text of post 3 here"
  ]
}}"#,
            content = content,
            count = Self::POST_COUNT,
            tone = tone,
            max_chars = Platform::LinkedIn.max_chars(),
            emoji_rule = Self::emoji_rule(tone),
        )
    }

    fn twitter_prompt(content: &str, tone: &Tone) -> String {
        format!(
            r#"You are a ghostwriter who writes viral posts for X (Twitter).

A user has given you the following topic, hot take, or notes:

---
{content}
---

Using that as source material, write exactly {count} distinct tweets in a **{tone}** tone.

Make each tweet a different shape:
1. A bold hot take that people will want to argue with.
2. A question or open loop that invites replies.
3. A punchy one-liner that works without any context.

Rules:
- Each tweet MUST be {max_chars} characters or fewer, counting spaces and line breaks.
- Each tweet must stand alone; no threads and no "1/3" markers.
- Do NOT use hashtags or "—" in the tweets.
- Do NOT number or label the tweets (no "Tweet 1", "Tweet 2", no headers).
- {emoji_rule}

Also write a short title (at most 8 words) that summarizes the topic.

Return ONLY valid JSON in this exact format (no markdown, no code fences, no text before or after):
{{
  "title": "Short topic title here",
  "posts": [
    "Full text of tweet 1 here",
    "Full text of tweet 2 here",
    "Full text of tweet 3 here"
  ]
}}"#,
            content = content,
            count = Self::POST_COUNT,
            tone = tone,
            max_chars = Platform::Twitter.max_chars(),
            emoji_rule = Self::emoji_rule(tone),
        )
    }
}
