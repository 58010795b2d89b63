//! # Textos de Demonstração
//!
//! Pequena coleção de textos em inglês, um por domínio, usada pela página de
//! demonstração e pelo endpoint `/demo-texts`. Os textos exercitam os
//! diferentes tipos de entidade e os casos difíceis do tokenizador.

/// Textos de demonstração: `(domínio, texto)`.
pub fn demo_texts() -> Vec<(&'static str, &'static str)> {
    vec![
        (
            "Business",
            "Apple is looking at buying U.K. startup for $1 billion. The deal, first reported by Bloomberg on Monday, would be the company's largest acquisition since 2014. Tim Cook declined to comment.",
        ),
        (
            "Technology",
            "Microsoft announced a new partnership with OpenAI in San Francisco. The company said its Windows team will ship the feature to 20% of users in March 2024, while Google and Amazon are expected to respond within three months.",
        ),
        (
            "Politics",
            "The United Nations held an emergency session in New York yesterday. Diplomats from France, Germany and Japan met with Mr. Guterres at 10:30 a.m. to discuss the situation in the Middle East.",
        ),
        (
            "History",
            "On July 20, 1969, NASA landed the first humans on the Moon. Albert Einstein had died in 1955, but his work shaped the physics of the 20th century. Britain and the United States led the Allies during World War II.",
        ),
        (
            "Science",
            "Researchers at Stanford and MIT published a study showing that the new vaccine, developed by Pfizer, reduced infections by 95 percent. Marie Curie remains the only person to win Nobel prizes in two sciences.",
        ),
        (
            "Sports",
            "Argentina won the World Cup in Qatar after beating France on penalties. More than 1.5 billion people watched the final, and the Super Bowl drew 115 million viewers in America last year.",
        ),
        (
            "Tokenization",
            "Dr. Smith isn't sure the U.S. economy will grow 2.5% in Q3; we'll see. She paid $1,299.99 for a state-of-the-art laptop at 5 p.m. on Friday, didn't she?",
        ),
    ]
}
