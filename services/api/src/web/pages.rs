//! services/api/src/web/pages.rs
//!
//! Server-rendered HTML for the login, registration and plan generator pages.

use crate::web::session::Notice;
use lesson_plan_core::{Focus, Grade, LessonDuration, Subject};

const STYLE: &str = r#"
body { font-family: Arial, sans-serif; background: linear-gradient(135deg, #1e3a8a, #3b82f6);
       min-height: 100vh; margin: 0; padding: 20px; color: #1f2937; display: flex;
       justify-content: center; align-items: flex-start; }
.container { background: white; border-radius: 12px; padding: 2rem; width: 100%;
             max-width: 400px; box-shadow: 0 10px 15px rgba(0, 0, 0, 0.2); }
.container.wide { max-width: 900px; }
h1 { font-size: 1.8rem; text-align: center; margin-bottom: 1.5rem; color: #1e3a8a; }
.form-group { margin-bottom: 1rem; }
.form-row { display: flex; gap: 1rem; }
.form-row .form-group { flex: 1; }
label { display: block; font-weight: 600; margin-bottom: 0.3rem; color: #374151; }
input, select { width: 100%; padding: 0.6rem; border: 1px solid #d1d5db; border-radius: 6px;
                font-size: 1rem; background: #f9fafb; box-sizing: border-box; }
button { background: #1e3a8a; color: white; padding: 0.8rem; border: none; border-radius: 6px;
         font-size: 1rem; cursor: pointer; width: 100%; margin-top: 1rem; }
button:hover { background: #1e40af; }
.message { padding: 0.75rem; border-radius: 6px; margin-bottom: 1rem; text-align: center; }
.message.success { background: #d1fae5; color: #065f46; }
.message.error { background: #fef2f2; color: #dc3545; }
.links { text-align: center; margin-top: 1rem; }
.user-info { text-align: right; margin-bottom: 1rem; }
.resultado { display: none; margin-top: 2rem; }
.plano-content { white-space: pre; font-family: monospace; overflow-x: auto; background: #f9fafb;
                 padding: 1rem; border-radius: 6px; border: 1px solid #d1d5db; }
.actions { display: flex; gap: 1rem; }
.loading { display: none; text-align: center; margin-top: 1rem; color: #1e3a8a; font-weight: 600; }
"#;

const SCRIPT: &str = r#"
const form = document.getElementById('plano-form');
const errorDiv = document.getElementById('error');
const resultado = document.getElementById('resultado');
const planoContent = document.getElementById('plano-content');
const loading = document.getElementById('loading');

form.addEventListener('submit', async (e) => {
    e.preventDefault();
    errorDiv.style.display = 'none';
    resultado.style.display = 'none';
    loading.style.display = 'block';
    try {
        const response = await fetch('/gerar', {
            method: 'POST',
            body: new URLSearchParams(new FormData(form)),
        });
        const data = await response.json();
        if (!data.success) {
            errorDiv.textContent = data.error;
            errorDiv.style.display = 'block';
        } else {
            planoContent.textContent = data.plano;
            resultado.style.display = 'block';
            resultado.scrollIntoView({ behavior: 'smooth' });
        }
    } catch (err) {
        errorDiv.textContent = `Erro: ${err.message}`;
        errorDiv.style.display = 'block';
    } finally {
        loading.style.display = 'none';
    }
});

function copyPlan() {
    navigator.clipboard.writeText(planoContent.textContent)
        .then(() => alert('Plano copiado para a área de transferência!'))
        .catch(() => alert('Erro ao copiar o plano.'));
}

function printPlan() {
    const win = window.open('', '_blank');
    if (!win) {
        alert('Não foi possível abrir a janela de impressão.');
        return;
    }
    win.document.title = 'Plano de Aula';
    const style = win.document.createElement('style');
    style.textContent = 'body { font-family: monospace; white-space: pre; padding: 20px; }';
    win.document.head.appendChild(style);
    const pre = win.document.createElement('pre');
    pre.textContent = planoContent.textContent;
    win.document.body.appendChild(pre);
    win.document.close();
    win.focus();
    win.print();
}

function newPlan() {
    form.reset();
    resultado.style.display = 'none';
    errorDiv.style.display = 'none';
    window.scrollTo({ top: 0, behavior: 'smooth' });
}
"#;

/// Escapes text for use inside HTML element content and attribute values.
pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#x27;"),
            _ => out.push(c),
        }
    }
    out
}

fn layout(title: &str, wide: bool, body: &str) -> String {
    format!(
        "<!DOCTYPE html>\n<html lang=\"pt-BR\">\n<head>\n\
         <meta charset=\"UTF-8\">\n\
         <meta name=\"viewport\" content=\"width=device-width, initial-scale=1.0\">\n\
         <title>{title}</title>\n<style>{STYLE}</style>\n</head>\n<body>\n\
         <div class=\"container{class}\">\n{body}</div>\n</body>\n</html>\n",
        title = escape(title),
        class = if wide { " wide" } else { "" },
    )
}

fn notice_html(notice: Option<&Notice>) -> String {
    notice
        .map(|n| {
            format!(
                "<div class=\"message {}\">{}</div>\n",
                n.kind.css_class(),
                escape(n.text)
            )
        })
        .unwrap_or_default()
}

fn credentials_form(action: &str, button: &str) -> String {
    format!(
        "<form method=\"POST\" action=\"{action}\">\n\
         <div class=\"form-group\"><label for=\"username\">Usuário</label>\
         <input type=\"text\" id=\"username\" name=\"username\" placeholder=\"Digite seu usuário\" required></div>\n\
         <div class=\"form-group\"><label for=\"password\">Senha</label>\
         <input type=\"password\" id=\"password\" name=\"password\" placeholder=\"Digite sua senha\" required></div>\n\
         <button type=\"submit\">{button}</button>\n</form>\n"
    )
}

pub fn login_page(notice: Option<&Notice>) -> String {
    let body = format!(
        "<h1>Login</h1>\n{}{}<div class=\"links\"><a href=\"/cadastro\">Não tem cadastro? Clique aqui</a></div>\n",
        notice_html(notice),
        credentials_form("/login", "Entrar"),
    );
    layout("Login - Gerador de Planos de Aula", false, &body)
}

pub fn register_page(notice: Option<&Notice>) -> String {
    let body = format!(
        "<h1>Cadastro</h1>\n{}{}<div class=\"links\"><a href=\"/login\">Já tem cadastro? Faça login</a></div>\n",
        notice_html(notice),
        credentials_form("/cadastro", "Cadastrar"),
    );
    layout("Cadastro - Gerador de Planos de Aula", false, &body)
}

fn select<T: ToString>(id: &str, label: &str, options: &[T]) -> String {
    let options: String = options
        .iter()
        .map(|o| {
            let value = escape(&o.to_string());
            format!("<option value=\"{value}\">{value}</option>")
        })
        .collect();
    format!(
        "<div class=\"form-group\"><label for=\"{id}\">{label}</label>\
         <select id=\"{id}\" name=\"{id}\" required><option value=\"\">Selecione...</option>{options}</select></div>\n"
    )
}

/// The generator form listing every subject, grade, duration and focus.
pub fn index_page(username: &str, notice: Option<&Notice>) -> String {
    let body = format!(
        "<div class=\"user-info\">Bem-vindo, {user}! <a href=\"/logout\">Sair</a></div>\n\
         <h1>Gerador de Planos de Aula</h1>\n{notice}\
         <form id=\"plano-form\">\n\
         <div class=\"form-group\"><label for=\"tema\">Tema da Aula</label>\
         <input type=\"text\" id=\"tema\" name=\"tema\" placeholder=\"Ex: Revolução Francesa\" required></div>\n\
         <div class=\"form-row\">{subjects}{grades}</div>\n\
         <div class=\"form-row\">{durations}{focuses}</div>\n\
         <button type=\"submit\">Gerar Plano</button>\n</form>\n\
         <div class=\"loading\" id=\"loading\">Gerando plano...</div>\n\
         <div class=\"message error\" id=\"error\" style=\"display: none\"></div>\n\
         <div class=\"resultado\" id=\"resultado\">\n<h2>Plano de Aula Gerado</h2>\n\
         <div class=\"plano-content\" id=\"plano-content\"></div>\n\
         <div class=\"actions\"><button type=\"button\" onclick=\"copyPlan()\">Copiar</button>\
         <button type=\"button\" onclick=\"printPlan()\">Imprimir</button>\
         <button type=\"button\" onclick=\"newPlan()\">Novo Plano</button></div>\n</div>\n\
         <script>{SCRIPT}</script>\n",
        user = escape(username),
        notice = notice_html(notice),
        subjects = select("disciplina", "Disciplina", Subject::ALL),
        grades = select("classe", "Classe", Grade::ALL),
        durations = select("duracao", "Duração (min)", LessonDuration::ALL),
        focuses = select("foco", "Foco da Aula", Focus::ALL),
    );
    layout("Gerador de Planos de Aula", true, &body)
}
