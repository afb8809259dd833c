//! Static reference material shown next to the critique views.

/// Ten rules for better prompting, as markdown.
pub const GOLDEN_RULES: &str = r#"#### 1. Be Purposeful: Don't Just Ask, Aim
- Weak: "Tell me about inflation"
- Better: "Explain inflation as if I'm a high school student. Give a real-world example and 3 key effects it has on everyday life."

#### 2. Set the Scene
- Define roles: who *you* are and who *the model* should be.
- Better: "Act as a university professor giving a crash course on superconductors."
- Better: "I'm a beginner Python student. Explain in simple terms."

#### 3. Control Output Format
- Better: "Use bullet points with bold keywords and one-liner explanations."
- Better: "Give a markdown table comparing X vs Y."

#### 4. Break It Down
- Weak: "Write a full research paper on LLMs."
- Better: "First give an outline. Then expand each point into ~150 words."

#### 5. Refine Iteratively
- Start simple: `"Explain quantum tunneling in simple terms."`
- Follow up: `"Nice, now add an analogy."` then `"Now give me a 2-line summary."`

#### 6. Embrace Weirdly Specific Prompts
- Better: "Explain this like I'm a cat trying to understand economic policies."
- Better: "Summarize the Bhagavad Gita in a tweet thread format."

#### 7. Use Few-Shot Prompting
- Provide examples of desired output.
- Better: "Here's a poem I like. Generate another in this style."

#### 8. Signal Uncertainty If Needed
- Better: "I'm not sure what I want yet, but I'm exploring AI use-cases in agriculture. Can you suggest a few?"

#### 9. Use Conditional Instructions
- Better: "If the topic seems too advanced, simplify it with analogies."
- Better: "If any step needs prior knowledge, explain that first."

#### 10. Keep a Prompt Scratchpad
- Log the prompts that worked well, what failed, and templates for code, summaries, MCQs and explanations.

---

> **"Be specific in goal, structured in request, flexible in tone, and iterative in thinking."**
"#;
