//! Fixed product tables. The values here encode editorial decisions, not
//! algorithmic output; they are kept verbatim and never derived.

use chrono::Weekday;

use crate::patterns::style::StyleKind;
use crate::Platform;

pub fn weekday_label(weekday: Weekday) -> &'static str {
    match weekday {
        Weekday::Mon => "Segunda-feira",
        Weekday::Tue => "Terça-feira",
        Weekday::Wed => "Quarta-feira",
        Weekday::Thu => "Quinta-feira",
        Weekday::Fri => "Sexta-feira",
        Weekday::Sat => "Sábado",
        Weekday::Sun => "Domingo",
    }
}

pub fn period_label(hour: u32) -> &'static str {
    match hour {
        6..=11 => "Manhã",
        12..=17 => "Tarde",
        18..=23 => "Noite",
        _ => "Madrugada",
    }
}

pub fn format_name(platform: Platform) -> &'static str {
    match platform {
        Platform::Instagram => "Carrossel ou Reels",
        Platform::YouTube => "Vídeo longo",
        Platform::TikTok => "Vídeo curto vertical",
        Platform::Twitter => "Thread ou post de texto",
        Platform::Facebook => "Post com imagem",
        Platform::LinkedIn => "Artigo ou post profissional",
        Platform::Pinterest => "Pin gráfico",
    }
}

pub fn platform_best_practices(platform: Platform) -> &'static [&'static str] {
    match platform {
        Platform::Instagram => &[
            "Use os primeiros 3 segundos para prender a atenção",
            "Carrosséis com 5 a 7 slides retêm mais",
            "Responda aos comentários na primeira hora",
        ],
        Platform::YouTube => &[
            "Títulos com até 60 caracteres performam melhor",
            "Apresente o tema nos primeiros 30 segundos",
            "Use capítulos para vídeos acima de 8 minutos",
        ],
        Platform::TikTok => &[
            "Vídeos de 15 a 30 segundos têm maior conclusão",
            "Use áudios em alta no momento da publicação",
        ],
        Platform::Twitter => &[
            "Threads com gancho forte no primeiro tweet",
            "Uma ideia por tweet, frases curtas",
        ],
        Platform::Facebook => &[
            "Posts com imagem geram mais compartilhamentos",
            "Perguntas diretas aumentam comentários",
        ],
        Platform::LinkedIn => &[
            "Abra com um dado ou resultado concreto",
            "Parágrafos de uma linha facilitam a leitura",
        ],
        Platform::Pinterest => &[
            "Imagens verticais 2:3 com texto sobreposto",
            "Descrições com palavras-chave de busca",
        ],
    }
}

pub const UNIVERSAL_TIP: &str =
    "Publique com consistência e responda ao público nas primeiras horas após postar";

pub fn style_characteristics(kind: StyleKind) -> &'static [&'static str] {
    match kind {
        StyleKind::Storytelling => &[
            "Narrativa em primeira pessoa",
            "Arco com começo, conflito e desfecho",
            "Conexão emocional com a audiência",
        ],
        StyleKind::Inspirational => &[
            "Mensagem de superação ou propósito",
            "Tom positivo e aspiracional",
            "Frases citáveis e compartilháveis",
        ],
        StyleKind::Concise => &[
            "Texto direto, sem rodeios",
            "Uma ideia central por post",
            "Leitura em menos de um minuto",
        ],
        StyleKind::CallToAction => &[
            "Instrução clara do próximo passo",
            "Verbo no imperativo",
            "Senso de urgência ou benefício imediato",
        ],
    }
}

/// Keywords that mark a call-to-action in body text. Matched lowercased.
pub const CTA_KEYWORDS: [&str; 2] = ["clique", "inscreva"];

/// Keywords that mark storytelling content. Matched lowercased.
pub const STORYTELLING_KEYWORDS: [&str; 2] = ["história", "quando eu"];

/// Keywords that mark inspirational content. Matched lowercased.
pub const INSPIRATIONAL_KEYWORDS: [&str; 2] = ["inspiração", "motivação"];

#[derive(Debug, Clone, Copy)]
pub struct TrendingTopic {
    pub name: &'static str,
    pub category: &'static str,
}

/// External trending-topics table. A static stand-in for a feed the
/// product team curates.
pub const TRENDING_TOPICS: [TrendingTopic; 6] = [
    TrendingTopic { name: "Inteligência artificial no dia a dia", category: "tecnologia" },
    TrendingTopic { name: "Rotina de produtividade", category: "estilo de vida" },
    TrendingTopic { name: "Finanças pessoais para iniciantes", category: "finanças" },
    TrendingTopic { name: "Receitas rápidas e saudáveis", category: "culinária" },
    TrendingTopic { name: "Bastidores da criação de conteúdo", category: "criadores" },
    TrendingTopic { name: "Minimalismo digital", category: "bem-estar" },
];

pub const GENERAL_STRATEGIES: [&str; 3] = [
    "Defina pilares de conteúdo e alterne entre eles durante a semana",
    "Reaproveite o conteúdo de melhor desempenho em outros formatos",
    "Analise os resultados mensalmente e ajuste o calendário editorial",
];

pub const GENERAL_TACTICS: [&str; 3] = [
    "Termine os posts com uma pergunta para estimular comentários",
    "Use os primeiros 125 caracteres para o gancho principal",
    "Fixe o melhor comentário para alimentar a conversa",
];

pub const GENERAL_MONETIZATION: [&str; 2] = [
    "Crie uma lista de e-mail para reduzir a dependência dos algoritmos",
    "Documente seus resultados em um media kit para negociar parcerias",
];

/// Simulated audience demographics, fixed shares per age bracket.
pub const SIMULATED_DEMOGRAPHICS: [(&str, f64); 4] = [
    ("18-24", 0.35),
    ("25-34", 0.40),
    ("35-44", 0.15),
    ("45+", 0.10),
];

/// Simulated audience sentiment split.
pub const SIMULATED_SENTIMENT: [(&str, f64); 3] =
    [("positivo", 0.62), ("neutro", 0.28), ("negativo", 0.10)];
