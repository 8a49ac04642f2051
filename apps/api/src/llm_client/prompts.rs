// Cross-cutting prompt fragments. Feature prompts live next to the feature.

/// System prompt for every call that must come back as a single JSON object.
pub const JSON_ONLY_SYSTEM: &str = "You are a precise, structured assistant. \
    You MUST respond with one valid JSON object only. \
    Do NOT include any text outside the JSON object. \
    Do NOT use markdown code fences.";
