//! Recommendations for the lead: one headline per tier, one line per weak category.

use crate::types::{Category, MaturityTier};

fn tier_headline(tier: MaturityTier) -> &'static str {
  match tier {
    MaturityTier::Beginner => {
      "Estruture o básico: registre clientes e oportunidades em um único lugar antes de pensar em automação."
    }
    MaturityTier::Basic => {
      "Padronize o processo comercial: defina as etapas do funil e uma rotina fixa de follow-up."
    }
    MaturityTier::Intermediate => {
      "Consolide a gestão por indicadores e conecte as ferramentas comerciais entre si."
    }
    MaturityTier::Advanced => {
      "Operação comercial madura: foque em otimização contínua e previsibilidade de receita."
    }
  }
}

fn category_advice(category: Category) -> &'static str {
  match category {
    Category::Crm => "Adote um CRM como fonte única de clientes, contatos e oportunidades.",
    Category::Pipeline => "Desenhe o funil de vendas com etapas e critérios de avanço claros.",
    Category::Cotacao => "Padronize a cotação de fretes com tabela de ICMS, GRIS e pedágio atualizada.",
    Category::Followup => "Defina prazos de retorno para cada proposta e registre cada contato.",
    Category::Historico => "Guarde o histórico de embarques e negociações por cliente.",
    Category::Indicadores => "Acompanhe taxa de conversão, ticket médio e ciclo de venda mensalmente.",
    Category::Segmentacao => "Segmente a carteira por perfil de carga, rota e potencial de volume.",
    Category::Qualificacao => "Qualifique leads antes da proposta: volume, frequência e decisor.",
    Category::Propostas => "Use modelos de proposta com escopo, SLA e condições comerciais.",
    Category::Integracao => "Integre CRM, cotação e financeiro para evitar retrabalho manual.",
  }
}

/// Headline first, then the weak categories in quiz order.
pub fn compute_recommendations(tier: MaturityTier, weakest: &[Category]) -> Vec<String> {
  let mut out = Vec::with_capacity(weakest.len() + 1);
  out.push(tier_headline(tier).to_string());
  for category in weakest {
    out.push(format!("{}: {}", category.label(), category_advice(*category)));
  }
  out
}
