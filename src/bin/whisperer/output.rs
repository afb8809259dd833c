use whisperer::{Evaluation, History};

pub fn print_evaluation(result: &Evaluation) {
    match &result.answer {
        Some(answer) => {
            println!("### Prompt Evaluation\n{}\n", result.evaluation);
            println!("### Answer Section\n{answer}\n");
        }
        None => println!("### Model Response\n{}\n", result.evaluation),
    }
    println!("Prompt evaluated! Score: {}", result.score);
}

pub fn print_history(history: &History) {
    if history.is_empty() {
        println!("No history available yet. Enter a prompt to start.");
        return;
    }
    println!("{:>4}  {:>6}  prompt", "#", "score");
    for (idx, entry) in history.iter().enumerate() {
        let prompt = entry.prompt.replace(['\r', '\n'], " ");
        println!("{:>4}  {:>6}  {}", idx + 1, entry.score_display(), prompt);
    }
}

pub fn print_rules() {
    println!("{}", whisperer::rules::GOLDEN_RULES);
}
