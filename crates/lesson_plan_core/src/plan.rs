//! crates/lesson_plan_core/src/plan.rs
//!
//! The lesson plan generator. Turns a validated `PlanRequest` into the
//! formatted Portuguese plan document by filling fixed skeletons chosen from
//! lookup tables keyed by focus and subject.

use crate::domain::{Focus, LessonDuration, PlanRequest, Subject};
use chrono::NaiveDate;

/// Canonical teaching media. The schedule uses the first four, the
/// resources section lists the first three.
pub const TEACHING_MEDIA: [&str; 5] = [
    "Quadro e marcador/giz",
    "Material impresso",
    "Projetor multimídia",
    "Livro didático",
    "Recursos digitais",
];

pub const DEFAULT_SCHOOL: &str = "Escola Secundária";

/// Column widths of the schedule table, excluding the one-space padding on
/// each side of a cell.
const COLUMN_WIDTHS: [usize; 7] = [6, 23, 26, 26, 26, 23, 23];

const COLUMN_TITLES: [&str; 7] = [
    "Tempo",
    "Função Didática",
    "Conteúdo",
    "Atividades (Professor)",
    "Atividades (Aluno)",
    "Técnica de Ensino",
    "Meios de Ensino",
];

//=========================================================================================
// Lookup Tables
//=========================================================================================

fn objectives(focus: Focus, topic: &str) -> [String; 3] {
    match focus {
        Focus::Theoretical => [
            format!("Compreender os conceitos fundamentais de {topic}."),
            format!("Analisar criticamente os aspectos principais de {topic}."),
            format!("Relacionar {topic} com contextos históricos ou sociais."),
        ],
        Focus::Practical => [
            format!("Aplicar {topic} em exercícios práticos."),
            format!("Desenvolver habilidades experimentais relacionadas a {topic}."),
            "Trabalhar em grupo para resolver problemas.".to_string(),
        ],
        Focus::Review => [
            format!("Revisar os principais pontos de {topic}."),
            format!("Consolidar o aprendizado sobre {topic} com exercícios."),
            "Esclarecer dúvidas dos alunos.".to_string(),
        ],
        Focus::Assessment => [
            format!("Avaliar o domínio de {topic} por meio de atividades."),
            format!("Identificar lacunas no aprendizado sobre {topic}."),
            "Promover a autoavaliação.".to_string(),
        ],
        Focus::Introduction => [
            format!("Introduzir {topic} de forma envolvente."),
            format!("Despertar curiosidade sobre {topic}."),
            format!("Conectar {topic} ao cotidiano dos alunos."),
        ],
    }
}

// Only four subjects have dedicated content; the rest share the generic lines.
fn content(subject: Subject, topic: &str) -> [String; 3] {
    match subject {
        Subject::History => [
            format!("Contexto histórico de {topic}."),
            "Eventos e figuras principais.".to_string(),
            "Impactos e legados.".to_string(),
        ],
        Subject::Geography => [
            format!("Aspectos geográficos de {topic}."),
            "Relações socioeconômicas.".to_string(),
            "Análise de mapas ou dados.".to_string(),
        ],
        Subject::Portuguese => [
            format!("Análise textual sobre {topic}."),
            "Estruturas linguísticas.".to_string(),
            "Produção textual.".to_string(),
        ],
        Subject::Mathematics => [
            format!("Conceitos matemáticos de {topic}."),
            "Resolução de problemas.".to_string(),
            "Aplicações práticas.".to_string(),
        ],
        _ => generic_content(topic),
    }
}

fn generic_content(topic: &str) -> [String; 3] {
    [
        format!("Introdução a {topic}."),
        "Conceitos básicos.".to_string(),
        "Exemplos.".to_string(),
    ]
}

fn techniques(focus: Focus) -> [&'static str; 3] {
    match focus {
        Focus::Theoretical => ["Exposição dialogada", "Aula expositiva", "Debate"],
        Focus::Practical => ["Resolução de problemas", "Atividade prática", "Simulação"],
        Focus::Review => ["Revisão guiada", "Exercícios de fixação", "Discussão de dúvidas"],
        Focus::Assessment => ["Prova escrita", "Apresentação oral", "Autoavaliação"],
        Focus::Introduction => ["Brainstorming", "Estudo de caso", "Vídeo introdutório"],
    }
}

fn activities(focus: Focus, topic: &str) -> [String; 3] {
    match focus {
        Focus::Practical => [
            format!("Exercícios práticos sobre {topic}."),
            "Atividade experimental em grupo.".to_string(),
            "Resolução de problemas colaborativa.".to_string(),
        ],
        _ => [
            format!("Questionário sobre {topic}."),
            "Discussão dirigida.".to_string(),
            format!("Análise de materiais relacionados a {topic}."),
        ],
    }
}

//=========================================================================================
// Schedule
//=========================================================================================

/// One row of the schedule table.
#[derive(Debug, Clone, PartialEq, Eq)]
struct ScheduleRow {
    minutes: u32,
    phase: &'static str,
    content: String,
    teacher_activity: String,
    student_activity: &'static str,
    technique: &'static str,
    medium: &'static str,
}

impl ScheduleRow {
    fn cells(&self) -> [String; 7] {
        [
            format!("{}'", self.minutes),
            self.phase.to_string(),
            self.content.clone(),
            self.teacher_activity.clone(),
            self.student_activity.to_string(),
            self.technique.to_string(),
            self.medium.to_string(),
        ]
    }
}

/// Builds the four didactic phases of the lesson.
fn schedule(duration: LessonDuration, topic: &str, focus: Focus) -> [ScheduleRow; 4] {
    let [t0, t1, t2, t3] = duration.time_slices();
    let tech = techniques(focus);

    [
        ScheduleRow {
            minutes: t0,
            phase: "Introdução e Motivação",
            content: format!("Apresentação de {topic}"),
            teacher_activity: format!("Introduzir {topic} e contextualizar."),
            student_activity: "Participar da discussão inicial.",
            technique: tech[0],
            medium: TEACHING_MEDIA[0],
        },
        ScheduleRow {
            minutes: t1,
            phase: "Mediação e Assimilação",
            content: format!("Exploração detalhada de {topic}"),
            teacher_activity: format!("Explicar os conceitos principais de {topic}."),
            student_activity: "Anotar e fazer perguntas.",
            technique: tech[1],
            medium: TEACHING_MEDIA[1],
        },
        ScheduleRow {
            minutes: t2,
            phase: "Domínio e Consolidação",
            content: format!("Aplicação prática de {topic}"),
            teacher_activity: format!("Orientar atividades práticas sobre {topic}."),
            student_activity: "Realizar exercícios ou projetos.",
            technique: tech[2],
            medium: TEACHING_MEDIA[2],
        },
        ScheduleRow {
            minutes: t3,
            phase: "Controlo e Avaliação",
            content: format!("Avaliação de {topic}"),
            teacher_activity: format!("Avaliar o aprendizado sobre {topic}."),
            student_activity: "Responder a questões ou apresentar resultados.",
            technique: tech[0],
            medium: TEACHING_MEDIA[3],
        },
    ]
}

fn border() -> String {
    let mut line = String::from("+");
    for width in COLUMN_WIDTHS {
        line.push_str(&"-".repeat(width + 2));
        line.push('+');
    }
    line
}

fn table_row<S: AsRef<str>>(cells: &[S; 7]) -> String {
    let mut line = String::from("|");
    for (cell, width) in cells.iter().zip(COLUMN_WIDTHS) {
        // Pads by character count, long cells overflow their column.
        line.push_str(&format!(" {:<width$} |", cell.as_ref(), width = width));
    }
    line
}

/// Renders the schedule as a fixed-width text table.
fn render_schedule(rows: &[ScheduleRow]) -> String {
    let border = border();
    let mut lines = vec![border.clone(), table_row(&COLUMN_TITLES), border.clone()];
    lines.extend(rows.iter().map(|row| table_row(&row.cells())));
    lines.push(border);
    lines.join("\n")
}

fn bullets<S: AsRef<str>>(items: &[S]) -> String {
    items
        .iter()
        .map(|item| format!("- {}", item.as_ref()))
        .collect::<Vec<_>>()
        .join("\n")
}

//=========================================================================================
// Generator
//=========================================================================================

/// Generates lesson plan documents for one school.
#[derive(Debug, Clone)]
pub struct PlanGenerator {
    school: String,
}

impl Default for PlanGenerator {
    fn default() -> Self {
        Self::new(DEFAULT_SCHOOL)
    }
}

impl PlanGenerator {
    pub fn new(school: impl Into<String>) -> Self {
        Self {
            school: school.into(),
        }
    }

    pub fn school(&self) -> &str {
        &self.school
    }

    /// Builds the full plan document dated `date`.
    ///
    /// The request is assumed to be validated already; every field is a
    /// member of its enumeration and the topic is non-empty.
    pub fn create_plan(&self, request: &PlanRequest, date: NaiveDate) -> String {
        let topic = request.topic.as_str();
        let rows = schedule(request.duration, topic, request.focus);

        format!(
            "PLANO DE AULA\n\
             \n\
             Escola: {school}\n\
             Data: {date}\n\
             Duração: {minutes} minutos\n\
             Disciplina: {subject}\n\
             Classe, Turma: {grade}, A\n\
             Unidade Temática: {topic}\n\
             Tema: {topic}\n\
             \n\
             OBJETIVOS ESPECÍFICOS\n\
             {objectives}\n\
             \n\
             CONTEÚDO\n\
             {content}\n\
             \n\
             CRONOGRAMA\n\
             {schedule}\n\
             \n\
             RECURSOS DIDÁTICOS\n\
             {resources}\n\
             \n\
             ATIVIDADES\n\
             {activities}\n\
             \n\
             AVALIAÇÃO\n\
             - Participação nas atividades\n\
             - Compreensão do tema\n\
             - Colaboração em grupo\n\
             \n\
             TAREFA DE CASA\n\
             - Leitura complementar sobre {topic}\n\
             - Exercícios de fixação\n",
            school = self.school,
            date = date.format("%d/%m/%Y"),
            minutes = request.duration.minutes(),
            subject = request.subject,
            grade = request.grade,
            topic = topic,
            objectives = bullets(&objectives(request.focus, topic)),
            content = bullets(&content(request.subject, topic)),
            schedule = render_schedule(&rows),
            resources = bullets(&TEACHING_MEDIA[..3]),
            activities = bullets(&activities(request.focus, topic)),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Grade;

    fn request(subject: Subject, duration: LessonDuration, focus: Focus) -> PlanRequest {
        PlanRequest {
            topic: "Revolução Francesa".to_string(),
            subject,
            grade: Grade::Ninth,
            duration,
            focus,
        }
    }

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, 7).unwrap()
    }

    fn section<'a>(plan: &'a str, title: &str) -> Vec<&'a str> {
        plan.split("\n\n")
            .find(|block| block.starts_with(title))
            .unwrap_or_else(|| panic!("missing section {title}"))
            .lines()
            .skip(1)
            .collect()
    }

    #[test]
    fn history_introduction_short_lesson() {
        let plan = PlanGenerator::default().create_plan(
            &request(Subject::History, LessonDuration::Short, Focus::Introduction),
            date(),
        );

        assert!(plan.starts_with("PLANO DE AULA\n\nEscola: Escola Secundária\n"));
        assert!(plan.contains("Data: 07/03/2024\n"));
        assert!(plan.contains("Duração: 45 minutos\n"));
        assert!(plan.contains("Classe, Turma: 9ª Classe, A\n"));

        assert_eq!(
            section(&plan, "CONTEÚDO"),
            vec![
                "- Contexto histórico de Revolução Francesa.",
                "- Eventos e figuras principais.",
                "- Impactos e legados.",
            ]
        );

        let times: Vec<&str> = section(&plan, "CRONOGRAMA")
            .iter()
            .filter(|l| l.starts_with("| ") && !l.starts_with("| Tempo"))
            .map(|l| l.split('|').nth(1).unwrap().trim())
            .collect();
        assert_eq!(times, vec!["5'", "20'", "15'", "5'"]);
    }

    #[test]
    fn topic_appears_in_header_objectives_and_homework() {
        for focus in Focus::ALL {
            let plan = PlanGenerator::default().create_plan(
                &request(Subject::Physics, LessonDuration::Long, *focus),
                date(),
            );
            assert!(plan.contains("Tema: Revolução Francesa\n"));
            assert!(section(&plan, "OBJETIVOS ESPECÍFICOS")
                .iter()
                .any(|l| l.contains("Revolução Francesa")));
            assert!(section(&plan, "TAREFA DE CASA")
                .iter()
                .any(|l| l.contains("Revolução Francesa")));
        }
    }

    #[test]
    fn subjects_without_content_use_generic_lines() {
        let generic = [
            "- Introdução a Revolução Francesa.",
            "- Conceitos básicos.",
            "- Exemplos.",
        ];
        for subject in Subject::ALL {
            let plan = PlanGenerator::default().create_plan(
                &request(*subject, LessonDuration::Short, Focus::Theoretical),
                date(),
            );
            let lines = section(&plan, "CONTEÚDO");
            let dedicated = matches!(
                subject,
                Subject::History | Subject::Geography | Subject::Portuguese | Subject::Mathematics
            );
            assert_eq!(lines.len(), 3);
            assert_eq!(lines == generic, !dedicated, "subject {subject}");
        }
    }

    #[test]
    fn practical_focus_has_its_own_activities() {
        let practical = activities(Focus::Practical, "x");
        for focus in Focus::ALL.iter().filter(|f| **f != Focus::Practical) {
            assert_ne!(activities(*focus, "x"), practical);
        }
    }

    #[test]
    fn schedule_uses_cyclic_techniques_and_sequential_media() {
        let rows = schedule(LessonDuration::Long, "x", Focus::Review);
        let minutes: Vec<u32> = rows.iter().map(|r| r.minutes).collect();
        assert_eq!(minutes, vec![10, 40, 30, 10]);
        assert_eq!(
            rows.iter().map(|r| r.technique).collect::<Vec<_>>(),
            vec!["Revisão guiada", "Exercícios de fixação", "Discussão de dúvidas", "Revisão guiada"]
        );
        assert_eq!(
            rows.iter().map(|r| r.medium).collect::<Vec<_>>(),
            TEACHING_MEDIA[..4].to_vec()
        );
    }

    #[test]
    fn schedule_table_has_borders_and_fixed_columns() {
        let table = render_schedule(&schedule(LessonDuration::Short, "Frações", Focus::Theoretical));
        let lines: Vec<&str> = table.lines().collect();
        assert_eq!(lines.len(), 8);
        assert_eq!(lines[0], border());
        assert_eq!(lines[2], border());
        assert_eq!(lines[7], border());
        assert!(lines[0].starts_with("+--------+-------------------------+"));
        assert!(lines[1].starts_with("| Tempo  | Função Didática         | Conteúdo "));
        assert!(lines[3].starts_with("| 5'     | Introdução e Motivação  | Apresentação de Frações    |"));
    }

    #[test]
    fn long_cells_are_not_truncated() {
        let topic = "Equações do segundo grau e suas aplicações";
        let table = render_schedule(&schedule(LessonDuration::Short, topic, Focus::Theoretical));
        assert!(table.contains(&format!("Explicar os conceitos principais de {topic}.")));
    }

    #[test]
    fn resources_are_first_three_media() {
        let plan = PlanGenerator::new("Escola Teste").create_plan(
            &request(Subject::Geography, LessonDuration::Short, Focus::Review),
            date(),
        );
        assert!(plan.contains("Escola: Escola Teste\n"));
        assert_eq!(
            section(&plan, "RECURSOS DIDÁTICOS"),
            vec![
                "- Quadro e marcador/giz",
                "- Material impresso",
                "- Projetor multimídia",
            ]
        );
    }
}
