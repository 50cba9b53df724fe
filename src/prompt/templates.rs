//! The predefined prompt bank: one render function per implemented
//! (content type, question family) pair. The wording and the JSON envelope
//! in each template are a frontend contract; do not reword them casually.

pub(crate) fn topic_multiple_choice(
    content: &str,
    level: &str,
    num_of_question: u32,
    subject_instruction: &str,
    exam_instruction: &str,
    custom_instruction: &str,
) -> String {
    format!(
        r#"You are an expert educational content generator. Create {num_of_question} unique and creatively framed multiple-choice questions that comprehensively assess understanding of the topic: "{content}". Ensure the questions vary in style—some direct, some conceptual, and some application-based—while maintaining the specified difficulty level: {level}. {subject_instruction} {exam_instruction} {custom_instruction}. Return the output strictly in this JSON format:
{{
  "context": "Here are {num_of_question} questions on the topic: {content} with {level} difficulty.",
  "topic": "{content}",
  "exam": "{exam_instruction}",
  "level": "{level}",
  "questions": [
    {{
      "stem": "Question text",
      "options": ["Option A", "Option B", "Option C", "Option D"],
      "correct_option": "Option A",
      "explanation": "Brief explanation of the correct answer."
    }}
  ]
}}
"#,
        num_of_question = num_of_question,
        content = content,
        level = level,
        subject_instruction = subject_instruction,
        exam_instruction = exam_instruction,
        custom_instruction = custom_instruction,
    )
}

pub(crate) fn topic_true_false(
    content: &str,
    level: &str,
    num_of_question: u32,
    subject_instruction: &str,
    exam_instruction: &str,
    custom_instruction: &str,
) -> String {
    format!(
        r#"You are an expert test designer. Generate **{num_of_question} well-balanced and logically challenging true/false questions** about the topic: **"{content}"**, ensuring a mix of facts, misconceptions, and analytical judgments at **{level}** difficulty. {subject_instruction} {exam_instruction} {custom_instruction}

Return the output strictly in this JSON format:

```json
{{
  "context": "Here are {num_of_question} questions on the topic: {content} with {level} difficulty.",
  "topic": "{content}",
  "exam": "{exam_instruction}",
  "level": "{level}",
  "questions": [
    {{
      "stem": "Statement text",
      "correct_option": true,
      "explanation": "Brief reasoning behind the true or false answer."
    }}
  ]
}}
```
"#,
        num_of_question = num_of_question,
        content = content,
        level = level,
        subject_instruction = subject_instruction,
        exam_instruction = exam_instruction,
        custom_instruction = custom_instruction,
    )
}

pub(crate) fn topic_fill_in_the_blanks(
    content: &str,
    level: &str,
    num_of_question: u32,
    subject_instruction: &str,
    exam_instruction: &str,
    custom_instruction: &str,
) -> String {
    format!(
        r#"You are a creative academic assistant. Create **{num_of_question} thought-provoking fill-in-the-blank questions** on the topic: **"{content}"**, using intelligent omissions that assess conceptual understanding. Maintain a consistent tone and ensure a suitable difficulty level: {level}. {subject_instruction} {exam_instruction} {custom_instruction}

Use **underscores (___)** to indicate blanks. Return the output strictly in this JSON format:

```json
{{
  "context": "Here are {num_of_question} questions on the topic: {content} with {level} difficulty.",
  "topic": "{content}",
  "exam": "{exam_instruction}",
  "level": "{level}",
  "questions": [
    {{
      "stem": "The capital of France is ___",
      "options": ["Paris", "Berlin", "Rome", "Madrid"],
      "correct_option": "Paris",
      "explanation": "Paris is the capital of France."
    }}
  ]
}}
```
"#,
        num_of_question = num_of_question,
        content = content,
        level = level,
        subject_instruction = subject_instruction,
        exam_instruction = exam_instruction,
        custom_instruction = custom_instruction,
    )
}

pub(crate) fn paragraph_multiple_choice(
    content: &str,
    level: &str,
    num_of_question: u32,
    subject_instruction: &str,
    exam_instruction: &str,
    custom_instruction: &str,
) -> String {
    format!(
        r#"You are a quiz master AI. Carefully analyze the following paragraph and generate **{num_of_question} insightful and well-reasoned multiple-choice questions** to evaluate comprehension, inference, and critical analysis at **{level}** difficulty:

"{content}"

Incorporate diversity in questioning styles—factual recall, implications, author intent, etc. {subject_instruction} {exam_instruction} {custom_instruction}

Return the output strictly in this JSON format:

```json
{{
  "context": "Here are {num_of_question} questions derived from the paragraph with {level} difficulty.",
  "topic": "Derived from paragraph",
  "exam": "{exam_instruction}",
  "level": "{level}",
  "questions": [
    {{
      "stem": "Question based on paragraph",
      "options": ["Option A", "Option B", "Option C", "Option D"],
      "correct_option": "Option B",
      "explanation": "Explanation based on paragraph analysis."
    }}
  ]
}}
```
"#,
        num_of_question = num_of_question,
        content = content,
        level = level,
        subject_instruction = subject_instruction,
        exam_instruction = exam_instruction,
        custom_instruction = custom_instruction,
    )
}

pub(crate) fn paragraph_true_false(
    content: &str,
    level: &str,
    num_of_question: u32,
    subject_instruction: &str,
    exam_instruction: &str,
    custom_instruction: &str,
) -> String {
    format!(
        r#"Read the following paragraph and generate **{num_of_question} well-reasoned true/false statements** that require understanding of both explicit and implicit content. The goal is to test critical reading and comprehension skills at **{level}** difficulty:

"{content}"

Ensure a balanced distribution of true and false answers. {subject_instruction} {exam_instruction} {custom_instruction}

Return the output strictly in this JSON format:

```json
{{
  "context": "Here are {num_of_question} questions derived from the paragraph with {level} difficulty.",
  "topic": "Derived from paragraph",
  "exam": "{exam_instruction}",
  "level": "{level}",
  "questions": [
    {{
      "stem": "Statement derived from paragraph",
      "correct_option": false,
      "explanation": "Explain why it is false."
    }}
  ]
}}
```
"#,
        num_of_question = num_of_question,
        content = content,
        level = level,
        subject_instruction = subject_instruction,
        exam_instruction = exam_instruction,
        custom_instruction = custom_instruction,
    )
}

pub(crate) fn paragraph_fill_in_the_blanks(
    content: &str,
    level: &str,
    num_of_question: u32,
    subject_instruction: &str,
    exam_instruction: &str,
    custom_instruction: &str,
) -> String {
    format!(
        r#"From the following paragraph, craft **{num_of_question} intelligent fill-in-the-blank questions** that test key facts, concepts, or contextually significant words. Use meaningful omissions and ensure a consistent tone across all questions. Target difficulty: **{level}**.

"{content}"

{subject_instruction} {exam_instruction} {custom_instruction}

Use **___** for blanks. Return the output strictly in this JSON format:

```json
{{
  "context": "Here are {num_of_question} questions derived from the paragraph with {level} difficulty.",
  "topic": "Derived from paragraph",
  "exam": "{exam_instruction}",
  "level": "{level}",
  "questions": [
    {{
      "stem": "The author argues that ___ is essential.",
      "options": ["freedom", "discipline", "order", "equality"],
      "correct_option": "freedom",
      "explanation": "Explanation based on paragraph logic."
    }}
  ]
}}
```
"#,
        num_of_question = num_of_question,
        content = content,
        level = level,
        subject_instruction = subject_instruction,
        exam_instruction = exam_instruction,
        custom_instruction = custom_instruction,
    )
}
