// Prompt constants for resume enhancement.

/// System prompt for the enhancement call. The model must return the
/// improved resume text and nothing else, so the response can be handed
/// straight back to the client.
pub const ENHANCE_SYSTEM: &str = "You are an expert resume writer. \
    Your task is to enhance the resume while maintaining its core content and structure. \
    Focus on improving clarity, impact, and professional language. \
    Return ONLY the enhanced resume text without any commentary or explanations.";

/// User prompt template; `{resume_text}` is substituted at call time.
pub const ENHANCE_PROMPT_TEMPLATE: &str = "Professionally enhance this resume, \
    focusing on clarity, impact, and ATS optimization:\n\n{resume_text}";
