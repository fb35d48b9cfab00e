//! System and user prompts for the analysis and slide-authoring oracles.
//!
//! Both oracles are instructed to answer with bare JSON; the clients still
//! run the first-`{`-to-last-`}` extraction as a recovery path, so wording
//! changes here cannot break parsing, only quality.

use charla_transcript::Language;

pub const ACCENTS: [&str; 7] = [
    "#6366f1", "#ec4899", "#f59e0b", "#10b981", "#3b82f6", "#8b5cf6", "#14b8a6",
];

const ANALYSIS_SCHEMA: &str = r#"
Schema:
{
  "speakers": [
    {
      "id": 0,
      "label": "Martín",
      "talkTimePercent": 55,
      "wordCount": 342,
      "interruptionsGiven": 3,
      "interruptionsReceived": 1,
      "bigFive": {
        "openness": 85,
        "conscientiousness": 70,
        "extraversion": 60,
        "agreeableness": 45,
        "neuroticism": 30
      },
      "language": {
        "overallScore": 78,
        "vocabularyScore": 85,
        "grammarScore": 71
      },
      "topics": [
        { "name": "seguridad IA", "percent": 45, "turnIndices": [2, 5, 12] },
        { "name": "tendencias industria", "percent": 30, "turnIndices": [7, 18] }
      ],
      "selfTurnIndices": [3, 9, 14],
      "energy": "high"
    }
  ],
  "overallTopics": ["tema1", "tema2"],
  "dynamics": "párrafo de 2-3 oraciones",
  "notablePhrases": [
    { "speakerId": 0, "phrase": "incertidumbre epistemológica", "type": "strong", "note": "Vocabulario filosófico preciso" },
    { "speakerId": 1, "phrase": "fuimos yo y él", "type": "weak", "note": "Debería ser 'él y yo'" }
  ],
  "interruptionTurns": [
    { "giver": 1, "receiver": 0, "turnIndex": 7 }
  ]
}"#;

const ANALYSIS_HEADER_EN: &str =
    "You are a conversation analyst. Analyze a diarized transcript and return ONLY valid JSON.";

const ANALYSIS_GUIDELINES_EN: &str = r#"
Speaker labels: try to identify the real name of each speaker from the conversation — someone may be addressed by name, introduce themselves, or be referred to by others. If you can determine a name with reasonable confidence, use it as the label (just the first name). If not, fall back to "Speaker A", "Speaker B", etc.

Big Five guidelines (score 0-100 based on conversational evidence):
- openness: curiosity, creativity, willingness to explore ideas
- conscientiousness: precision, structure, staying on topic
- extraversion: talkativeness, energy, dominance in conversation
- agreeableness: cooperation, avoiding conflict, warmth
- neuroticism: emotional volatility, defensiveness, anxiety signals

Language guidelines:
- vocabularyScore: range and sophistication of words used
- grammarScore: grammatical correctness
- overallScore: average weighted
- notablePhrases: max 8 total. "strong" = rare/precise/eloquent word or phrase. "weak" = clear grammar mistake or awkward phrasing. Use exact substrings from the transcript. IMPORTANT: ignore digits used as spoken words (e.g. "1" instead of "one", "2" instead of "two") — these are speech-to-text transcription artifacts, not speaker errors.

Interruptions: identify turns where a speaker cuts off or takes over mid-sentence from another speaker. The turnIndex refers to the [N] index prefix in the numbered transcript. List each interruption event with the giver (who interrupted), receiver (who was cut off), and turnIndex (the giver's turn number).

Topics per speaker: for each speaker, list up to 4 topics they personally discussed. Each topic: name (2-4 word label IN ENGLISH), percent (must sum to ~100), turnIndices (max 6). Be specific.

selfTurnIndices: for each speaker, list the [N] turn indices where that speaker talks about themselves — their own personal experiences, feelings, opinions, memories, or life. NOT abstract topics or general ideas. Be selective."#;

const ANALYSIS_HEADER_ES: &str =
    "Eres un analista de conversaciones. Analizá la transcripción diarizada y devolvé SOLO JSON válido.";

const ANALYSIS_GUIDELINES_ES: &str = r#"
Nombres de hablantes: intentá identificar el nombre real de cada hablante — alguien puede ser nombrado, presentarse, o ser mencionado por otros. Si podés determinarlo con confianza razonable, usalo como label (solo el primer nombre). Si no, usá "Hablante A", "Hablante B", etc.

Big Five (puntaje 0-100 basado en evidencia conversacional):
- openness: curiosidad, creatividad, disposición a explorar ideas
- conscientiousness: precisión, estructura, mantenerse en tema
- extraversion: locuacidad, energía, dominancia en la conversación
- agreeableness: cooperación, evitar conflictos, calidez
- neuroticism: volatilidad emocional, defensividad, señales de ansiedad

Lenguaje:
- vocabularyScore: rango y sofisticación del vocabulario
- grammarScore: corrección gramatical
- overallScore: promedio ponderado
- notablePhrases: máximo 8 en total. "strong" = palabra o frase precisa/elocuente/inusual. "weak" = error gramatical claro o construcción extraña. Usá substrings exactos de la transcripción. IMPORTANTE: ignorá dígitos usados como palabras habladas (ej: "1" en lugar de "uno", "2" en lugar de "dos") — son artefactos de la transcripción automática, no errores del hablante.

Interrupciones: identificá los turnos donde un hablante corta o toma la palabra mientras otro habla. El turnIndex refiere al índice [N] de la transcripción numerada. Listá cada evento con giver (quien interrumpió), receiver (quien fue cortado) y turnIndex.

Temas por hablante: para cada hablante, listá hasta 4 temas que discutió personalmente. Cada tema: name (etiqueta de 2-4 palabras EN ESPAÑOL), percent (debe sumar ~100), turnIndices (máximo 6). Sé específico.

selfTurnIndices: para cada hablante, listá los índices [N] de los turnos donde ese hablante habla de sí mismo — sus propias experiencias personales, sentimientos, opiniones, recuerdos o vida. NO temas abstractos ni ideas generales. Sé selectivo y preciso."#;

pub fn analysis_system(language: Language) -> String {
    match language {
        Language::En => [ANALYSIS_HEADER_EN, ANALYSIS_SCHEMA, ANALYSIS_GUIDELINES_EN].concat(),
        Language::Es => [ANALYSIS_HEADER_ES, ANALYSIS_SCHEMA, ANALYSIS_GUIDELINES_ES].concat(),
    }
}

pub fn analysis_user(transcript_text: &str, stats_json: &str) -> String {
    format!("Transcript:\n{transcript_text}\n\nStats:\n{stats_json}\n\nReturn JSON analysis.")
}

const SLIDES_HEADER: &str = r#"You are a real-time presentation builder. Given a spoken transcript, extract a slide deck.

Decide if the transcript has enough new content to update the slide deck. If YES return Schema A. If NO return {"noChange": true}.

Schema A:
{
  "deckTitle": "string",
  "slides": [
    {
      "id": "slide_1",
      "layout": "title" | "content" | "quote",
      "title": "string",
      "bullets": ["string"],
      "accent": ""#;

const SLIDES_RULES: &str = r#""
    }
  ]
}

Rules:
- layout "title": opening/closing slide, large centered text, no bullets
- layout "content": regular slide with title + 2-4 bullet points (concise, punchy)
- layout "quote": a strong statement or key number, title is the quote, no bullets
- Keep bullet points SHORT — max 8 words each
- Pick accent color from: "#;

const SLIDES_FOOTER: &str = r#"
- First slide should always be layout "title"
- Keep slide ids stable across updates (slide_1, slide_2, etc.)
- Add new slides as the talk progresses, update existing ones if needed
- Output ONLY valid JSON, no extra text"#;

pub fn slides_system() -> String {
    [
        SLIDES_HEADER,
        ACCENTS[0],
        SLIDES_RULES,
        &ACCENTS.join(", "),
        SLIDES_FOOTER,
    ]
    .concat()
}

pub fn slides_user(current_deck_json: &str, transcript: &str) -> String {
    format!(
        "Current slide deck:\n{current_deck_json}\n\nTranscript so far:\n\"{transcript}\"\n\nUpdate the deck if there's new content worth a slide. Return JSON."
    )
}
